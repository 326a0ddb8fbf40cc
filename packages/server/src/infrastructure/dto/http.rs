//! HTTP API response DTOs.

use serde::Serialize;

use super::websocket::ParticipantDto;

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthDto {
    pub status: String,
    /// ISO 8601 UTC
    pub timestamp: String,
}

/// Response of `GET /api/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListDto {
    pub count: usize,
    pub users: Vec<ParticipantDto>,
}
