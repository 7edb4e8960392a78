// Server module entry point
// Listener creation, the accept loop and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::{bind_listener, create_reusable_listener};
pub use server_loop::run_server;
pub use signal::ShutdownSignal;
