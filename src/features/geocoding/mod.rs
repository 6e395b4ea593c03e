mod service;

pub use service::{Geocoder, GeocodingService};
