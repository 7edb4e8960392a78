//! HTTP protocol layer module
//!
//! Header rules and response helpers shared by the policy engine and the
//! static file handler. No I/O here.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, full_body, ResponseBody};
