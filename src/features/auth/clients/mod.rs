mod idp_client;

pub use idp_client::{IdpClient, IdpUserResponse, TokenGrantResponse};
