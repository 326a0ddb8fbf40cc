//! Code shared by the Hiroba server and client.
//!
//! - `protocol`: event envelopes exchanged over the WebSocket channel
//! - `time`: clock abstraction and ISO-8601 helpers
//! - `logger`: tracing subscriber setup for the binaries

pub mod logger;
pub mod protocol;
pub mod time;
