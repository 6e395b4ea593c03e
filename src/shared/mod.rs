pub mod constants;
pub mod geo;
pub mod links;
pub mod test_helpers;
pub mod types;
pub mod validation;
