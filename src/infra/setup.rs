use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{http::app_state::AppState, payment::stripe::StripePaymentProvider},
    infra::{config::AppConfig, postgres_persistence},
    use_cases::{
        entitlement::{EntitlementUseCases, PaymentProviderPort},
        promo_code::{PromoCodeRepo, PromoCodeUseCases},
        tenant::{TenantRepo, TenantUseCases},
        testimonial::{ModerationUseCases, TestimonialRepo},
        wall::WallUseCases,
    },
};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::from_env());

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);
    let tenants = postgres_arc.clone() as Arc<dyn TenantRepo>;
    let codes = postgres_arc.clone() as Arc<dyn PromoCodeRepo>;
    let testimonials = postgres_arc.clone() as Arc<dyn TestimonialRepo>;

    let payments = Arc::new(StripePaymentProvider::new(config.stripe_secret_key.clone()))
        as Arc<dyn PaymentProviderPort>;

    Ok(AppState {
        config: config.clone(),
        tenant_use_cases: Arc::new(TenantUseCases::new(tenants.clone(), payments.clone())),
        entitlement_use_cases: Arc::new(EntitlementUseCases::new(
            tenants.clone(),
            codes.clone(),
            payments,
            config.app_origin.clone(),
            config.stripe_price_id.clone(),
        )),
        promo_code_use_cases: Arc::new(PromoCodeUseCases::new(codes)),
        moderation_use_cases: Arc::new(ModerationUseCases::new(
            testimonials.clone(),
            tenants.clone(),
        )),
        wall_use_cases: Arc::new(WallUseCases::new(tenants, testimonials)),
    })
}

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "kudowall=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs)
    let file = File::create("app.log").expect("cannot create log file");
    let json_layer = fmt::layer()
        .json()
        .with_writer(file)
        .with_current_span(true)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
