use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{
        app_state::AppState,
        routes::auth::{TenantResponse, current_tenant_id},
    },
    app_error::AppResult,
    use_cases::testimonial::{TestimonialProfile, TestimonialStatus},
};

#[derive(Serialize)]
struct ItemsResponse<T> {
    items: Vec<T>,
}

#[derive(Deserialize)]
struct WallSettingsPayload {
    wall_title: Option<String>,
    wall_description: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/testimonials", get(list_testimonials))
        .route("/testimonials/{id}/approve", post(approve_testimonial))
        .route("/testimonials/{id}/hide", post(hide_testimonial))
        .route("/testimonials/{id}", delete(delete_testimonial))
        .route("/wall", patch(update_wall_settings))
}

async fn me(State(app_state): State<AppState>, cookies: CookieJar) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    let tenant = app_state.tenant_use_cases.get(tenant_id).await?;
    Ok(Json(TenantResponse::from(tenant)))
}

async fn list_testimonials(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    let items: Vec<TestimonialProfile> =
        app_state.moderation_use_cases.list_for_owner(tenant_id).await?;
    Ok(Json(ItemsResponse { items }))
}

async fn approve_testimonial(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state
        .moderation_use_cases
        .set_status(tenant_id, id, TestimonialStatus::Approved)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn hide_testimonial(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state
        .moderation_use_cases
        .set_status(tenant_id, id, TestimonialStatus::Hidden)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_testimonial(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state.moderation_use_cases.delete(tenant_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_wall_settings(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Json(payload): Json<WallSettingsPayload>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state
        .tenant_use_cases
        .update_wall_settings(
            tenant_id,
            payload.wall_title.as_deref(),
            payload.wall_description.as_deref(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
