use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    infra::config::AppConfig,
    use_cases::{
        entitlement::EntitlementUseCases, promo_code::PromoCodeUseCases, tenant::TenantUseCases,
        testimonial::ModerationUseCases, wall::WallUseCases,
    },
};

use super::{InMemoryPromoCodeRepo, InMemoryTenantRepo, InMemoryTestimonialRepo, StubPaymentProvider};

pub const TEST_ADMIN_KEY: &str = "test-admin-key-12345678";

/// Handles to the in-memory stores behind a built `AppState`, for seeding
/// and assertions.
pub struct TestHandles {
    pub tenants: Arc<InMemoryTenantRepo>,
    pub codes: Arc<InMemoryPromoCodeRepo>,
    pub testimonials: Arc<InMemoryTestimonialRepo>,
    pub payments: Arc<StubPaymentProvider>,
}

/// Builds an `AppState` wired entirely to in-memory mocks.
#[derive(Default)]
pub struct TestAppStateBuilder;

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(self) -> (AppState, TestHandles) {
        let tenants = Arc::new(InMemoryTenantRepo::default());
        let codes = Arc::new(InMemoryPromoCodeRepo::with_tenants(tenants.clone()));
        let testimonials = Arc::new(InMemoryTestimonialRepo::default());
        let payments = Arc::new(StubPaymentProvider::default());

        let config = Arc::new(test_config());
        let app_state = AppState {
            config: config.clone(),
            tenant_use_cases: Arc::new(TenantUseCases::new(tenants.clone(), payments.clone())),
            entitlement_use_cases: Arc::new(EntitlementUseCases::new(
                tenants.clone(),
                codes.clone(),
                payments.clone(),
                config.app_origin.clone(),
                config.stripe_price_id.clone(),
            )),
            promo_code_use_cases: Arc::new(PromoCodeUseCases::new(codes.clone())),
            moderation_use_cases: Arc::new(ModerationUseCases::new(
                testimonials.clone(),
                tenants.clone(),
            )),
            wall_use_cases: Arc::new(WallUseCases::new(tenants.clone(), testimonials.clone())),
        };

        (app_state, TestHandles { tenants, codes, testimonials, payments })
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "postgres://unused".to_string(),
        jwt_secret: SecretString::new("test-jwt-secret".into()),
        session_ttl: Duration::hours(1),
        app_origin: Url::parse("https://kudowall.test").unwrap(),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        stripe_secret_key: SecretString::new("sk_test_unused".into()),
        stripe_price_id: "price_test_123".to_string(),
        admin_api_key: SecretString::new(TEST_ADMIN_KEY.into()),
    }
}
