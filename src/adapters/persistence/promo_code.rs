use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::promo_code::{PromoCodeProfile, PromoCodeRepo, RedeemOutcome},
};

const SELECT_COLS: &str = "id, code, active, redeemed_by, created_at";

fn row_to_profile(row: &sqlx::postgres::PgRow) -> PromoCodeProfile {
    PromoCodeProfile {
        id: row.get("id"),
        code: row.get("code"),
        active: row.get("active"),
        redeemed_by: row.get("redeemed_by"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl PromoCodeRepo for PostgresPersistence {
    async fn insert_code(&self, id: Uuid, code: &str) -> AppResult<Option<PromoCodeProfile>> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO promo_codes (id, code)
               VALUES ($1, $2)
               ON CONFLICT (code) DO NOTHING
               RETURNING {SELECT_COLS}"#
        ))
        .bind(id)
        .bind(code)
        .fetch_optional(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_profile))
    }

    async fn list_codes(&self) -> AppResult<Vec<PromoCodeProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM promo_codes ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(rows.iter().map(row_to_profile).collect())
    }

    async fn redeem_code(&self, code: &str, tenant_id: Uuid) -> AppResult<RedeemOutcome> {
        let mut tx = self.pool().begin().await.map_err(AppError::from)?;

        // Conditional single-row update: of any number of racing redemptions
        // exactly one sees active = TRUE.
        let consumed = sqlx::query(
            r#"UPDATE promo_codes
               SET active = FALSE, redeemed_by = $2
               WHERE code = $1 AND active = TRUE"#,
        )
        .bind(code)
        .bind(tenant_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        if consumed.rows_affected() != 1 {
            tx.rollback().await.map_err(AppError::from)?;
            return Ok(RedeemOutcome::NotAvailable);
        }

        sqlx::query("UPDATE tenants SET entitlement = 'lifetime' WHERE id = $1")
            .bind(tenant_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(RedeemOutcome::Redeemed)
    }
}
