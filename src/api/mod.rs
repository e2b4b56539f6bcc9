pub mod response;
pub mod wire;

pub use response::{ApiResponse, ApiResult};
