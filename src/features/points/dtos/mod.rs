mod point_dto;

pub use point_dto::{
    ContactLinksDto, CreatePointDto, NearbyPointDto, NearbyQuery, PointResponseDto,
    PointSearchQuery, UpdatePointDto, UpdatePointStatusDto,
};
