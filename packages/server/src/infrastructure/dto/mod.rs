//! Data Transfer Objects (DTOs) for the chat application.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (re-exported from `hiroba-shared`)
//! - `http`: HTTP API response DTOs
//! - `conversion`: domain entity → DTO conversion

pub mod conversion;
pub mod http;
pub mod websocket;
