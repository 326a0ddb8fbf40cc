//! WebSocket chat server: router, handlers and per-connection sessions.

mod handler;
mod server;
mod session;
mod signal;
pub mod state;

pub use server::Server;
pub use session::Session;
pub use state::AppState;
