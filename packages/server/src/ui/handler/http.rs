//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use hiroba_shared::time::timestamp_to_iso8601;

use crate::{
    infrastructure::dto::{
        http::{HealthDto, UserListDto},
        websocket::ParticipantDto,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        timestamp: timestamp_to_iso8601(state.clock.now_millis()),
    })
}

/// Current roster, in connection order
pub async fn get_users(State(state): State<Arc<AppState>>) -> Json<UserListDto> {
    let participants = state.get_participants_usecase.execute().await;

    // Domain Model から DTO への変換
    let users: Vec<ParticipantDto> = participants.iter().map(ParticipantDto::from).collect();

    Json(UserListDto {
        count: users.len(),
        users,
    })
}
