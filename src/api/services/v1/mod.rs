//! JSON API v1

pub mod collections;
pub mod error_code;
pub mod helpers;
pub mod routes;
pub mod shortcuts;
pub mod types;

pub use error_code::ErrorCode;
pub use routes::api_v1_routes;
pub use types::ApiResponse;
