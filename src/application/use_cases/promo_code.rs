use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};

/// Single-use grant of lifetime entitlement.
#[derive(Debug, Clone, Serialize)]
pub struct PromoCodeProfile {
    pub id: Uuid,
    pub code: String,
    pub active: bool,
    pub redeemed_by: Option<Uuid>,
    pub created_at: NaiveDateTime,
}

/// Result of the conditional consume in the store. `NotAvailable` covers both
/// "no such code" and "already used" so callers cannot probe which codes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    Redeemed,
    NotAvailable,
}

#[async_trait]
pub trait PromoCodeRepo: Send + Sync {
    /// Insert a fresh code. Returns `None` when the code string already
    /// exists, so the caller can regenerate.
    async fn insert_code(&self, id: Uuid, code: &str) -> AppResult<Option<PromoCodeProfile>>;
    async fn list_codes(&self) -> AppResult<Vec<PromoCodeProfile>>;
    /// Atomically flip `active -> false`, record the redeeming tenant and set
    /// that tenant's entitlement to lifetime, all in one transaction. The
    /// consume must be a single conditional update so racing redemptions of
    /// the same code resolve to exactly one `Redeemed`.
    async fn redeem_code(&self, code: &str, tenant_id: Uuid) -> AppResult<RedeemOutcome>;
}

// Uppercase alphanumerics without 0/O/1/I. 32 symbols, so a random byte
// masked to 5 bits indexes it uniformly.
const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 26;
const MAX_GENERATE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct PromoCodeUseCases {
    repo: Arc<dyn PromoCodeRepo>,
}

impl PromoCodeUseCases {
    pub fn new(repo: Arc<dyn PromoCodeRepo>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn generate_code(&self) -> AppResult<PromoCodeProfile> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = random_code();
            if let Some(profile) = self.repo.insert_code(Uuid::new_v4(), &code).await? {
                return Ok(profile);
            }
            tracing::warn!("promo code collision, regenerating");
        }
        Err(AppError::Internal("could not generate a unique promo code".into()))
    }

    pub async fn list_codes(&self) -> AppResult<Vec<PromoCodeProfile>> {
        self.repo.list_codes().await
    }
}

pub(crate) fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn random_code() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; CODE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| CODE_ALPHABET[(b & 0x1f) as usize] as char)
        .collect()
}
