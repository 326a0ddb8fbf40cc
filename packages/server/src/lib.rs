//! Hiroba chat server.
//!
//! One global room: every WebSocket connection becomes a participant with a
//! generated display name, chat messages are relayed to everyone (sender
//! included), and every roster change is followed by a full `user list`
//! broadcast.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
