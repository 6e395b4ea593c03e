mod need_dto;

pub use need_dto::{CreateNeedDto, NeedResponseDto, UpdateNeedDto};
