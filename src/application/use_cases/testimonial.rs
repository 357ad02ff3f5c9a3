use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::tenant::TenantRepo,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    Pending,
    Approved,
    Hidden,
}

impl TestimonialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestimonialStatus::Pending => "pending",
            TestimonialStatus::Approved => "approved",
            TestimonialStatus::Hidden => "hidden",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "pending" => Ok(TestimonialStatus::Pending),
            "approved" => Ok(TestimonialStatus::Approved),
            "hidden" => Ok(TestimonialStatus::Hidden),
            other => Err(AppError::Database(format!("unknown testimonial status: {other}"))),
        }
    }
}

/// Ids are creation-ordered (bigserial), which gives dashboard and wall
/// listings their stable newest-first order.
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialProfile {
    pub id: i64,
    pub tenant_id: Uuid,
    pub author_name: String,
    pub content: String,
    pub rating: Option<i32>,
    pub status: TestimonialStatus,
    pub created_at: NaiveDateTime,
}

pub struct NewTestimonial<'a> {
    pub tenant_id: Uuid,
    pub author_name: &'a str,
    pub content: &'a str,
    pub rating: Option<i32>,
}

#[async_trait]
pub trait TestimonialRepo: Send + Sync {
    async fn insert(&self, testimonial: NewTestimonial<'_>) -> AppResult<TestimonialProfile>;
    async fn get(&self, id: i64) -> AppResult<Option<TestimonialProfile>>;
    async fn set_status(&self, id: i64, status: TestimonialStatus) -> AppResult<()>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    /// All statuses, newest-first.
    async fn list_by_owner(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>>;
    /// Approved only, newest-first.
    async fn list_approved(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>>;
}

#[derive(Clone)]
pub struct ModerationUseCases {
    testimonials: Arc<dyn TestimonialRepo>,
    tenants: Arc<dyn TenantRepo>,
}

impl ModerationUseCases {
    pub fn new(testimonials: Arc<dyn TestimonialRepo>, tenants: Arc<dyn TenantRepo>) -> Self {
        Self { testimonials, tenants }
    }

    /// Public, unauthenticated submission. Always lands in `pending`.
    #[instrument(skip(self, content))]
    pub async fn submit(
        &self,
        tenant_id: Uuid,
        author_name: &str,
        content: &str,
        rating: Option<i32>,
    ) -> AppResult<TestimonialProfile> {
        if self.tenants.find_by_id(tenant_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        let author_name = author_name.trim();
        let content = content.trim();
        if author_name.is_empty() || content.is_empty() {
            return Err(AppError::InvalidInput("author name and content are required".into()));
        }
        self.testimonials
            .insert(NewTestimonial { tenant_id, author_name, content, rating })
            .await
    }

    pub async fn list_for_owner(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>> {
        self.testimonials.list_by_owner(tenant_id).await
    }

    /// Owner-only transition between approved and hidden. Setting the current
    /// status again is a no-op success.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        acting_tenant: Uuid,
        testimonial_id: i64,
        status: TestimonialStatus,
    ) -> AppResult<()> {
        let testimonial = self.owned(acting_tenant, testimonial_id).await?;
        if testimonial.status == status {
            return Ok(());
        }
        self.testimonials.set_status(testimonial_id, status).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, acting_tenant: Uuid, testimonial_id: i64) -> AppResult<()> {
        self.owned(acting_tenant, testimonial_id).await?;
        self.testimonials.delete(testimonial_id).await
    }

    async fn owned(&self, acting_tenant: Uuid, id: i64) -> AppResult<TestimonialProfile> {
        let testimonial = self.testimonials.get(id).await?.ok_or(AppError::NotFound)?;
        if testimonial.tenant_id != acting_tenant {
            return Err(AppError::Forbidden);
        }
        Ok(testimonial)
    }
}
