pub mod enrichment;
mod point_service;

pub use point_service::PointService;
