use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::{
        entitlement::PaymentProviderPort,
        promo_code::{PromoCodeProfile, PromoCodeRepo, RedeemOutcome},
        tenant::{EntitlementTier, NewTenant, TenantProfile, TenantRepo},
        testimonial::{NewTestimonial, TestimonialProfile, TestimonialRepo, TestimonialStatus},
    },
};

// ============================================================================
// InMemoryTenantRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryTenantRepo {
    tenants: Mutex<Vec<TenantProfile>>,
}

impl InMemoryTenantRepo {
    /// Test helper, bypasses the engine's transition rules.
    pub fn set_entitlement(&self, id: Uuid, tier: EntitlementTier) {
        let mut tenants = self.tenants.lock().unwrap();
        if let Some(tenant) = tenants.iter_mut().find(|t| t.id == id) {
            tenant.entitlement = tier;
        }
    }
}

#[async_trait]
impl TenantRepo for InMemoryTenantRepo {
    async fn insert_tenant(&self, tenant: NewTenant<'_>) -> AppResult<TenantProfile> {
        let mut tenants = self.tenants.lock().unwrap();
        if tenants.iter().any(|t| t.email == tenant.email) {
            return Err(AppError::DuplicateEmail);
        }
        let profile = TenantProfile {
            id: Uuid::new_v4(),
            email: tenant.email.to_string(),
            password_hash: tenant.password_hash.to_string(),
            entitlement: EntitlementTier::Locked,
            stripe_customer_id: tenant.stripe_customer_id.to_string(),
            wall_title: None,
            wall_description: None,
            created_at: Utc::now().naive_utc(),
        };
        tenants.push(profile.clone());
        Ok(profile)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<TenantProfile>> {
        Ok(self.tenants.lock().unwrap().iter().find(|t| t.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TenantProfile>> {
        Ok(self.tenants.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn update_wall_settings(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<()> {
        let mut tenants = self.tenants.lock().unwrap();
        let tenant = tenants.iter_mut().find(|t| t.id == id).ok_or(AppError::NotFound)?;
        tenant.wall_title = title.map(str::to_string);
        tenant.wall_description = description.map(str::to_string);
        Ok(())
    }

    async fn activate_if_locked(&self, id: Uuid) -> AppResult<bool> {
        let mut tenants = self.tenants.lock().unwrap();
        let tenant = tenants.iter_mut().find(|t| t.id == id).ok_or(AppError::NotFound)?;
        if tenant.entitlement == EntitlementTier::Locked {
            tenant.entitlement = EntitlementTier::Active;
            return Ok(true);
        }
        Ok(false)
    }
}

// ============================================================================
// InMemoryPromoCodeRepo
// ============================================================================

/// Mirrors the store's transactional redeem: the conditional consume and the
/// tenant's lifetime grant happen under one lock.
#[derive(Default)]
pub struct InMemoryPromoCodeRepo {
    codes: Mutex<Vec<PromoCodeProfile>>,
    forced_collisions: AtomicUsize,
    tenants: Option<Arc<InMemoryTenantRepo>>,
}

impl InMemoryPromoCodeRepo {
    pub fn with_tenants(tenants: Arc<InMemoryTenantRepo>) -> Self {
        Self { tenants: Some(tenants), ..Self::default() }
    }

    /// Make the next `n` inserts report a code collision.
    pub fn force_collisions(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl PromoCodeRepo for InMemoryPromoCodeRepo {
    async fn insert_code(&self, id: Uuid, code: &str) -> AppResult<Option<PromoCodeProfile>> {
        if self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Ok(None);
        }
        let mut codes = self.codes.lock().unwrap();
        if codes.iter().any(|c| c.code == code) {
            return Ok(None);
        }
        let profile = PromoCodeProfile {
            id,
            code: code.to_string(),
            active: true,
            redeemed_by: None,
            created_at: Utc::now().naive_utc(),
        };
        codes.push(profile.clone());
        Ok(Some(profile))
    }

    async fn list_codes(&self) -> AppResult<Vec<PromoCodeProfile>> {
        let codes = self.codes.lock().unwrap();
        Ok(codes.iter().rev().cloned().collect())
    }

    async fn redeem_code(&self, code: &str, tenant_id: Uuid) -> AppResult<RedeemOutcome> {
        let mut codes = self.codes.lock().unwrap();
        let Some(entry) = codes.iter_mut().find(|c| c.code == code && c.active) else {
            return Ok(RedeemOutcome::NotAvailable);
        };
        entry.active = false;
        entry.redeemed_by = Some(tenant_id);
        if let Some(tenants) = &self.tenants {
            tenants.set_entitlement(tenant_id, EntitlementTier::Lifetime);
        }
        Ok(RedeemOutcome::Redeemed)
    }
}

// ============================================================================
// InMemoryTestimonialRepo
// ============================================================================

#[derive(Default)]
pub struct InMemoryTestimonialRepo {
    testimonials: Mutex<Vec<TestimonialProfile>>,
    next_id: AtomicI64,
}

#[async_trait]
impl TestimonialRepo for InMemoryTestimonialRepo {
    async fn insert(&self, testimonial: NewTestimonial<'_>) -> AppResult<TestimonialProfile> {
        let profile = TestimonialProfile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            tenant_id: testimonial.tenant_id,
            author_name: testimonial.author_name.to_string(),
            content: testimonial.content.to_string(),
            rating: testimonial.rating,
            status: TestimonialStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };
        self.testimonials.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn get(&self, id: i64) -> AppResult<Option<TestimonialProfile>> {
        Ok(self.testimonials.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn set_status(&self, id: i64, status: TestimonialStatus) -> AppResult<()> {
        let mut testimonials = self.testimonials.lock().unwrap();
        let entry = testimonials.iter_mut().find(|t| t.id == id).ok_or(AppError::NotFound)?;
        entry.status = status;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut testimonials = self.testimonials.lock().unwrap();
        let before = testimonials.len();
        testimonials.retain(|t| t.id != id);
        if testimonials.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_by_owner(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>> {
        let testimonials = self.testimonials.lock().unwrap();
        let mut owned: Vec<_> =
            testimonials.iter().filter(|t| t.tenant_id == tenant_id).cloned().collect();
        owned.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(owned)
    }

    async fn list_approved(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>> {
        let testimonials = self.testimonials.lock().unwrap();
        let mut approved: Vec<_> = testimonials
            .iter()
            .filter(|t| t.tenant_id == tenant_id && t.status == TestimonialStatus::Approved)
            .cloned()
            .collect();
        approved.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(approved)
    }
}

// ============================================================================
// Payment provider stubs
// ============================================================================

#[derive(Default)]
pub struct StubPaymentProvider {
    pub created_customers: Mutex<Vec<String>>,
}

#[async_trait]
impl PaymentProviderPort for StubPaymentProvider {
    async fn create_customer(&self, email: &str) -> AppResult<String> {
        self.created_customers.lock().unwrap().push(email.to_string());
        Ok(format!("cus_{}", Uuid::new_v4().simple()))
    }

    async fn create_checkout_session(
        &self,
        _customer_id: &str,
        _price_id: &str,
        _success_url: &str,
        _cancel_url: &str,
    ) -> AppResult<String> {
        Ok(format!("https://checkout.stripe.test/c/{}", Uuid::new_v4().simple()))
    }

    async fn create_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> AppResult<String> {
        Ok(format!("https://billing.stripe.test/p/{}", Uuid::new_v4().simple()))
    }
}

/// Provider that is always down, for abort-path tests.
pub struct FailingPaymentProvider;

#[async_trait]
impl PaymentProviderPort for FailingPaymentProvider {
    async fn create_customer(&self, _email: &str) -> AppResult<String> {
        Err(AppError::PaymentProvider("provider unavailable".into()))
    }

    async fn create_checkout_session(
        &self,
        _customer_id: &str,
        _price_id: &str,
        _success_url: &str,
        _cancel_url: &str,
    ) -> AppResult<String> {
        Err(AppError::PaymentProvider("provider unavailable".into()))
    }

    async fn create_portal_session(
        &self,
        _customer_id: &str,
        _return_url: &str,
    ) -> AppResult<String> {
        Err(AppError::PaymentProvider("provider unavailable".into()))
    }
}
