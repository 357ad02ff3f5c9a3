use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::{
        tenant::TenantRepo,
        testimonial::{TestimonialProfile, TestimonialRepo},
    },
};

/// Public projection of a tenant's approved testimonials. Carries nothing
/// about the tenant beyond the wall copy itself.
#[derive(Debug, Serialize)]
pub struct WallView {
    pub wall_title: Option<String>,
    pub wall_description: Option<String>,
    pub testimonials: Vec<TestimonialProfile>,
}

#[derive(Clone)]
pub struct WallUseCases {
    tenants: Arc<dyn TenantRepo>,
    testimonials: Arc<dyn TestimonialRepo>,
}

impl WallUseCases {
    pub fn new(tenants: Arc<dyn TenantRepo>, testimonials: Arc<dyn TestimonialRepo>) -> Self {
        Self { tenants, testimonials }
    }

    /// Read-only: approved testimonials newest-first for a known tenant.
    #[instrument(skip(self))]
    pub async fn get_wall(&self, tenant_id: Uuid) -> AppResult<WallView> {
        let tenant = self.tenants.find_by_id(tenant_id).await?.ok_or(AppError::NotFound)?;
        let testimonials = self.testimonials.list_approved(tenant_id).await?;
        Ok(WallView {
            wall_title: tenant.wall_title,
            wall_description: tenant.wall_description,
            testimonials,
        })
    }
}
