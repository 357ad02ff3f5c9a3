use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, routes::auth::current_tenant_id},
    app_error::AppResult,
};

#[derive(Serialize)]
struct RedirectResponse {
    url: String,
}

#[derive(Deserialize)]
struct RedeemPayload {
    code: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout))
        .route("/confirm", post(confirm))
        .route("/portal", post(portal))
        .route("/redeem", post(redeem))
}

async fn checkout(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    let url = app_state.entitlement_use_cases.request_checkout(tenant_id).await?;
    Ok(Json(RedirectResponse { url }))
}

/// Hit by the front end when the browser returns from a successful checkout.
async fn confirm(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state.entitlement_use_cases.confirm_checkout(tenant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn portal(
    State(app_state): State<AppState>,
    cookies: CookieJar,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    let url = app_state.entitlement_use_cases.request_billing_portal(tenant_id).await?;
    Ok(Json(RedirectResponse { url }))
}

async fn redeem(
    State(app_state): State<AppState>,
    cookies: CookieJar,
    Json(payload): Json<RedeemPayload>,
) -> AppResult<impl IntoResponse> {
    let tenant_id = current_tenant_id(&cookies, &app_state)?;
    app_state
        .entitlement_use_cases
        .redeem_promo_code(tenant_id, &payload.code)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
