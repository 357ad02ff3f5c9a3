use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;

use crate::{
    adapters::http::app_state::AppState, app_error::AppError,
    use_cases::tenant::constant_time_compare,
};

/// Guard for the administrative promo-code routes: requires the configured
/// key in `x-admin-key`.
pub async fn admin_key_middleware(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidCredentials)?;

    if !constant_time_compare(presented, app_state.config.admin_api_key.expose_secret()) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(next.run(request).await)
}
