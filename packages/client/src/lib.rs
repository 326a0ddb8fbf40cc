//! Hiroba terminal chat client.

pub mod connection;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod reconciler;
pub mod runner;
pub mod transport;
pub mod ui;

pub use runner::run_client;
