use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        entitlement::EntitlementUseCases, promo_code::PromoCodeUseCases,
        tenant::TenantUseCases, testimonial::ModerationUseCases, wall::WallUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tenant_use_cases: Arc<TenantUseCases>,
    pub entitlement_use_cases: Arc<EntitlementUseCases>,
    pub promo_code_use_cases: Arc<PromoCodeUseCases>,
    pub moderation_use_cases: Arc<ModerationUseCases>,
    pub wall_use_cases: Arc<WallUseCases>,
}
