use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    use_cases::wall::WallView,
};

#[derive(Deserialize)]
struct SubmitPayload {
    author_name: String,
    content: String,
    rating: Option<i32>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{tenant_id}/testimonials", post(submit_testimonial))
        .route("/{tenant_id}/wall", get(show_wall))
}

/// Unauthenticated: the tenant id is the stable public reference embedded in
/// the collection link.
async fn submit_testimonial(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
    Json(payload): Json<SubmitPayload>,
) -> AppResult<impl IntoResponse> {
    let testimonial = app_state
        .moderation_use_cases
        .submit(tenant_id, &payload.author_name, &payload.content, payload.rating)
        .await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

async fn show_wall(
    State(app_state): State<AppState>,
    Path(tenant_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let wall: WallView = app_state.wall_use_cases.get_wall(tenant_id).await?;
    Ok(Json(wall))
}
