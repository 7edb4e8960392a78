//! Request handler module
//!
//! Every request runs through the header policy, then the static file server.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::StaticFileServer;
