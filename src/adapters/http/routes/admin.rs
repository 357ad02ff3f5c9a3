use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::{
    adapters::http::{app_state::AppState, middleware::admin_key_middleware},
    app_error::AppResult,
    use_cases::promo_code::PromoCodeProfile,
};

#[derive(Serialize)]
struct ItemsResponse<T> {
    items: Vec<T>,
}

pub fn router(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/promo-codes", get(list_codes).post(generate_code))
        .layer(middleware::from_fn_with_state(app_state, admin_key_middleware))
}

async fn generate_code(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let code: PromoCodeProfile = app_state.promo_code_use_cases.generate_code().await?;
    Ok((StatusCode::CREATED, Json(code)))
}

async fn list_codes(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = app_state.promo_code_use_cases.list_codes().await?;
    Ok(Json(ItemsResponse { items }))
}
