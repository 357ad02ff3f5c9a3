use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, is_unique_violation},
    app_error::{AppError, AppResult},
    use_cases::tenant::{EntitlementTier, NewTenant, TenantProfile, TenantRepo},
};

const SELECT_COLS: &str = r#"
    id, email, password_hash, entitlement, stripe_customer_id,
    wall_title, wall_description, created_at
"#;

fn row_to_profile(row: &sqlx::postgres::PgRow) -> AppResult<TenantProfile> {
    Ok(TenantProfile {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        entitlement: EntitlementTier::parse(row.get("entitlement"))?,
        stripe_customer_id: row.get("stripe_customer_id"),
        wall_title: row.get("wall_title"),
        wall_description: row.get("wall_description"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl TenantRepo for PostgresPersistence {
    async fn insert_tenant(&self, tenant: NewTenant<'_>) -> AppResult<TenantProfile> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO tenants (id, email, password_hash, entitlement, stripe_customer_id)
               VALUES ($1, $2, $3, 'locked', $4)
               RETURNING {SELECT_COLS}"#
        ))
        .bind(Uuid::new_v4())
        .bind(tenant.email)
        .bind(tenant.password_hash)
        .bind(tenant.stripe_customer_id)
        .fetch_one(self.pool())
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::DuplicateEmail
            } else {
                AppError::from(err)
            }
        })?;
        row_to_profile(&row)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<TenantProfile>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM tenants WHERE email = $1"))
            .bind(email)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<TenantProfile>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM tenants WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn update_wall_settings(
        &self,
        id: Uuid,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE tenants SET wall_title = $2, wall_description = $3 WHERE id = $1")
            .bind(id)
            .bind(title)
            .bind(description)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn activate_if_locked(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE tenants SET entitlement = 'active' WHERE id = $1 AND entitlement = 'locked'",
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected() == 1)
    }
}
