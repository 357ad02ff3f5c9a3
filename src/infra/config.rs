use std::{env, net::SocketAddr};

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;
use url::Url;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub jwt_secret: SecretString,
    pub session_ttl: Duration,
    /// Public origin of the front end; checkout success/cancel and the
    /// billing portal return URL are derived from it.
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    pub stripe_secret_key: SecretString,
    pub stripe_price_id: String,
    /// Shared secret for the administrative promo-code routes.
    pub admin_api_key: SecretString,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or("127.0.0.1:3001".to_string())
            .parse()
            .expect("BIND_ADDR must be a valid socket address");

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret: SecretString =
            SecretString::new(env::var("JWT_SECRET").expect("JWT_SECRET must be set").into());

        let session_ttl_hours: i64 = env::var("SESSION_TTL_HOURS")
            .unwrap_or("24".to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid number");

        let app_origin: Url = env::var("APP_ORIGIN")
            .expect("APP_ORIGIN must be set")
            .parse()
            .expect("APP_ORIGIN must be a valid URL");

        let cors_origin: HeaderValue = env::var("CORS_ORIGIN")
            .unwrap_or("http://localhost:3000".to_string())
            .parse()
            .expect("CORS_ORIGIN must be a valid header value");

        let stripe_secret_key: SecretString = SecretString::new(
            env::var("STRIPE_SECRET_KEY").expect("STRIPE_SECRET_KEY must be set").into(),
        );
        let stripe_price_id = env::var("STRIPE_PRICE_ID").expect("STRIPE_PRICE_ID must be set");

        let admin_api_key: SecretString = SecretString::new(
            env::var("ADMIN_API_KEY").expect("ADMIN_API_KEY must be set").into(),
        );

        Self {
            bind_addr,
            database_url,
            jwt_secret,
            session_ttl: Duration::hours(session_ttl_hours),
            app_origin,
            cors_origin,
            stripe_secret_key,
            stripe_price_id,
            admin_api_key,
        }
    }
}
