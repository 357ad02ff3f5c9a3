use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::{
        promo_code::{PromoCodeRepo, RedeemOutcome, normalize_code},
        tenant::TenantRepo,
    },
};

/// External payment provider. All calls are synchronous request/response,
/// fallible and never retried here.
#[async_trait]
pub trait PaymentProviderPort: Send + Sync {
    async fn create_customer(&self, email: &str) -> AppResult<String>;
    async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<String>;
    async fn create_portal_session(&self, customer_id: &str, return_url: &str)
    -> AppResult<String>;
}

#[derive(Clone)]
pub struct EntitlementUseCases {
    tenants: Arc<dyn TenantRepo>,
    codes: Arc<dyn PromoCodeRepo>,
    payments: Arc<dyn PaymentProviderPort>,
    app_origin: Url,
    stripe_price_id: String,
}

impl EntitlementUseCases {
    pub fn new(
        tenants: Arc<dyn TenantRepo>,
        codes: Arc<dyn PromoCodeRepo>,
        payments: Arc<dyn PaymentProviderPort>,
        app_origin: Url,
        stripe_price_id: String,
    ) -> Self {
        Self { tenants, codes, payments, app_origin, stripe_price_id }
    }

    /// Build a provider-hosted checkout session and return its redirect URL.
    #[instrument(skip(self))]
    pub async fn request_checkout(&self, tenant_id: Uuid) -> AppResult<String> {
        let tenant = self.tenants.find_by_id(tenant_id).await?.ok_or(AppError::NotFound)?;
        let success_url = self.origin_url("/billing/success")?;
        let cancel_url = self.origin_url("/billing/cancel")?;
        self.payments
            .create_checkout_session(
                &tenant.stripe_customer_id,
                &self.stripe_price_id,
                &success_url,
                &cancel_url,
            )
            .await
    }

    /// Success callback after the provider-hosted checkout. Trusts the
    /// redirect without provider-side confirmation, exactly like the flow it
    /// replaces: the browser reaching this endpoint is the only evidence of
    /// payment. Idempotent; never downgrades an existing tier.
    #[instrument(skip(self))]
    pub async fn confirm_checkout(&self, tenant_id: Uuid) -> AppResult<()> {
        if self.tenants.find_by_id(tenant_id).await?.is_none() {
            return Err(AppError::NotFound);
        }
        if self.tenants.activate_if_locked(tenant_id).await? {
            tracing::info!(%tenant_id, "entitlement transitioned locked -> active");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn request_billing_portal(&self, tenant_id: Uuid) -> AppResult<String> {
        let tenant = self.tenants.find_by_id(tenant_id).await?.ok_or(AppError::NotFound)?;
        let return_url = self.origin_url("/dashboard")?;
        self.payments
            .create_portal_session(&tenant.stripe_customer_id, &return_url)
            .await
    }

    /// Redeem a single-use code for lifetime entitlement. The entitlement
    /// check happens before the consume so an already-entitled tenant never
    /// burns a code.
    #[instrument(skip(self, raw_code))]
    pub async fn redeem_promo_code(&self, tenant_id: Uuid, raw_code: &str) -> AppResult<()> {
        let code = normalize_code(raw_code);
        if code.is_empty() {
            return Err(AppError::EmptyCode);
        }

        let tenant = self.tenants.find_by_id(tenant_id).await?.ok_or(AppError::NotFound)?;
        if tenant.entitlement.is_entitled() {
            return Err(AppError::AlreadyEntitled);
        }

        match self.codes.redeem_code(&code, tenant_id).await? {
            RedeemOutcome::Redeemed => {
                tracing::info!(%tenant_id, "promo code redeemed, entitlement is lifetime");
                Ok(())
            }
            RedeemOutcome::NotAvailable => Err(AppError::InvalidOrUsedCode),
        }
    }

    fn origin_url(&self, path: &str) -> AppResult<String> {
        self.app_origin
            .join(path)
            .map(|u| u.to_string())
            .map_err(|e| AppError::Internal(format!("invalid app origin: {e}")))
    }
}
