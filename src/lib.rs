//! Static file server for web application bundles
//!
//! Serves a build directory over HTTP with the response headers a
//! WebAssembly bundle needs: cross-origin isolation, CORS, `Content-Encoding`
//! for pre-compressed assets and explicit MIME types.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod policy;
pub mod server;
