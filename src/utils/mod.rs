pub mod auth;
pub mod error;
pub mod jwt;
pub mod logging;
pub mod response;

pub use error::AppError;
pub use response::{BaseResponse, ErrorResponse};
