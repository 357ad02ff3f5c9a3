use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    application::jwt,
    use_cases::tenant::TenantProfile,
};

pub const SESSION_COOKIE: &str = "session_token";

#[derive(Deserialize)]
struct CredentialsPayload {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct TenantResponse {
    pub id: Uuid,
    pub email: String,
    pub entitlement: &'static str,
    pub wall_title: Option<String>,
    pub wall_description: Option<String>,
}

impl From<TenantProfile> for TenantResponse {
    fn from(tenant: TenantProfile) -> Self {
        TenantResponse {
            id: tenant.id,
            email: tenant.email,
            entitlement: tenant.entitlement.as_str(),
            wall_title: tenant.wall_title,
            wall_description: tenant.wall_description,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

async fn signup(
    State(app_state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> AppResult<impl IntoResponse> {
    let tenant = app_state
        .tenant_use_cases
        .signup(&payload.email, &payload.password)
        .await?;
    let headers = session_headers(&app_state, tenant.id)?;
    Ok((StatusCode::CREATED, headers, Json(TenantResponse::from(tenant))))
}

async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> AppResult<impl IntoResponse> {
    let tenant = app_state
        .tenant_use_cases
        .authenticate(&payload.email, &payload.password)
        .await?;
    let headers = session_headers(&app_state, tenant.id)?;
    Ok((StatusCode::OK, headers, Json(TenantResponse::from(tenant))))
}

async fn logout() -> AppResult<impl IntoResponse> {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let mut headers = HeaderMap::new();
    headers.append(
        "set-cookie",
        removal
            .to_string()
            .parse()
            .map_err(|_| AppError::Internal("invalid cookie header".into()))?,
    );
    Ok((StatusCode::NO_CONTENT, headers))
}

fn session_headers(app_state: &AppState, tenant_id: Uuid) -> AppResult<HeaderMap> {
    let token = jwt::issue(tenant_id, &app_state.config.jwt_secret, app_state.config.session_ttl)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    let mut headers = HeaderMap::new();
    headers.append(
        "set-cookie",
        cookie
            .to_string()
            .parse()
            .map_err(|_| AppError::Internal("invalid cookie header".into()))?,
    );
    Ok(headers)
}

/// Resolve the acting tenant from the session cookie. Sessions themselves
/// are a transport concern; every owner-scoped operation receives the
/// resolved tenant id.
pub fn current_tenant_id(cookies: &CookieJar, app_state: &AppState) -> AppResult<Uuid> {
    let token = cookies.get(SESSION_COOKIE).ok_or(AppError::InvalidCredentials)?;
    let claims = jwt::verify(token.value(), &app_state.config.jwt_secret)?;
    Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidCredentials)
}
