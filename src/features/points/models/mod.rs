mod collection_point;

pub use collection_point::{CollectionPoint, PointResolution, PointStatus};
