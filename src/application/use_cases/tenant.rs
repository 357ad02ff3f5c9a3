use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::entitlement::PaymentProviderPort,
};

/// Access tier controlling use of paid collection features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitlementTier {
    Locked,
    Active,
    Lifetime,
}

impl EntitlementTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitlementTier::Locked => "locked",
            EntitlementTier::Active => "active",
            EntitlementTier::Lifetime => "lifetime",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "locked" => Ok(EntitlementTier::Locked),
            "active" => Ok(EntitlementTier::Active),
            "lifetime" => Ok(EntitlementTier::Lifetime),
            other => Err(AppError::Database(format!("unknown entitlement tier: {other}"))),
        }
    }

    /// Active and lifetime are equivalent for gate checks.
    pub fn is_entitled(&self) -> bool {
        matches!(self, EntitlementTier::Active | EntitlementTier::Lifetime)
    }
}

#[derive(Debug, Clone)]
pub struct TenantProfile {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub entitlement: EntitlementTier,
    pub stripe_customer_id: String,
    pub wall_title: Option<String>,
    pub wall_description: Option<String>,
    pub created_at: NaiveDateTime,
}

pub struct NewTenant<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub stripe_customer_id: &'a str,
}

#[async_trait]
pub trait TenantRepo: Send + Sync {
    /// Insert a new tenant. Must fail with `DuplicateEmail` on a unique
    /// violation so concurrent signups with the same email are resolved by
    /// the store, not by the preceding lookup.
    async fn insert_tenant(&self, tenant: NewTenant<'_>) -> AppResult<TenantProfile>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<TenantProfile>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TenantProfile>>;
    async fn update_wall_settings(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<()>;
    /// Conditional update: locked -> active. Returns false when the tenant
    /// was not locked (no row changed).
    async fn activate_if_locked(&self, id: Uuid) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct TenantUseCases {
    repo: Arc<dyn TenantRepo>,
    payments: Arc<dyn PaymentProviderPort>,
}

impl TenantUseCases {
    pub fn new(repo: Arc<dyn TenantRepo>, payments: Arc<dyn PaymentProviderPort>) -> Self {
        Self { repo, payments }
    }

    /// Create a tenant. The payment customer is created first so a provider
    /// failure leaves no tenant row behind.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<TenantProfile> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput("email and password are required".into()));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let customer_id = self.payments.create_customer(&email).await?;
        let password_hash = hash_password(password);

        self.repo
            .insert_tenant(NewTenant {
                email: &email,
                password_hash: &password_hash,
                stripe_customer_id: &customer_id,
            })
            .await
    }

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<TenantProfile> {
        let email = email.trim().to_lowercase();
        let tenant = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        if !verify_password(password, &tenant.password_hash) {
            return Err(AppError::InvalidCredentials);
        }
        Ok(tenant)
    }

    pub async fn get(&self, tenant_id: Uuid) -> AppResult<TenantProfile> {
        self.repo.find_by_id(tenant_id).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn update_wall_settings(
        &self,
        tenant_id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<()> {
        self.repo.update_wall_settings(tenant_id, title, description).await
    }
}

// Stored as "salt$digest", both hex. The rest of the core treats the hash as
// an opaque string.
fn hash_password(password: &str) -> String {
    use rand::RngCore;
    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);
    format!("{}${}", salt_hex, digest_with_salt(&salt_hex, password))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, expected)) = stored.split_once('$') else {
        return false;
    };
    constant_time_compare(&digest_with_salt(salt_hex, password), expected)
}

fn digest_with_salt(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}
