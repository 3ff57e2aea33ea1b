//! API handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::types::{Album, AlbumPayload};

/// Confirmation or error text returned to the client
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Health check with store status
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        albums: state.store.len().await,
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub albums: usize,
}

/// List every album in display order
pub async fn list_albums(State(state): State<AppState>) -> Json<Vec<Album>> {
    Json(state.store.list().await)
}

/// Fetch one album
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ApiError> {
    let album = state.store.get(&id).await?;
    Ok(Json(album))
}

/// Add an album; the server assigns the ID
pub async fn create_album(
    State(state): State<AppState>,
    payload: Result<Json<AlbumPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload?;

    let album = state.store.create(payload).await.map_err(|err| {
        tracing::info!(error = %err, "Rejected album");
        ApiError::from(err)
    })?;
    tracing::info!(id = %album.id, "Added album");

    Ok((
        StatusCode::CREATED,
        MessageResponse::new(format!(
            "Added '{}' by {} at ID {}",
            album.title, album.artist, album.id
        )),
    ))
}

/// Replace an album's fields, keeping its ID
pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AlbumPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;

    let previous = state.store.update(&id, payload).await?;
    tracing::info!(%id, "Updated album");

    Ok(MessageResponse::new(format!(
        "changes made to {} by {}.",
        previous.title, previous.artist
    )))
}

/// Remove an album
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.store.delete(&id).await?;
    tracing::info!(%id, "Deleted album");

    Ok(MessageResponse::new(format!(
        "{} by {} has been deleted.",
        removed.title, removed.artist
    )))
}
