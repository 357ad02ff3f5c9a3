use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    use_cases::testimonial::{
        NewTestimonial, TestimonialProfile, TestimonialRepo, TestimonialStatus,
    },
};

const SELECT_COLS: &str = "id, tenant_id, author_name, content, rating, status, created_at";

fn row_to_profile(row: &sqlx::postgres::PgRow) -> AppResult<TestimonialProfile> {
    Ok(TestimonialProfile {
        id: row.get("id"),
        tenant_id: row.get("tenant_id"),
        author_name: row.get("author_name"),
        content: row.get("content"),
        rating: row.get("rating"),
        status: TestimonialStatus::parse(row.get("status"))?,
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl TestimonialRepo for PostgresPersistence {
    async fn insert(&self, testimonial: NewTestimonial<'_>) -> AppResult<TestimonialProfile> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO testimonials (tenant_id, author_name, content, rating, status)
               VALUES ($1, $2, $3, $4, 'pending')
               RETURNING {SELECT_COLS}"#
        ))
        .bind(testimonial.tenant_id)
        .bind(testimonial.author_name)
        .bind(testimonial.content)
        .bind(testimonial.rating)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        row_to_profile(&row)
    }

    async fn get(&self, id: i64) -> AppResult<Option<TestimonialProfile>> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLS} FROM testimonials WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(AppError::from)?;
        row.as_ref().map(row_to_profile).transpose()
    }

    async fn set_status(&self, id: i64, status: TestimonialStatus) -> AppResult<()> {
        sqlx::query("UPDATE testimonials SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn list_by_owner(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLS} FROM testimonials WHERE tenant_id = $1 ORDER BY id DESC"
        ))
        .bind(tenant_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;
        rows.iter().map(row_to_profile).collect()
    }

    async fn list_approved(&self, tenant_id: Uuid) -> AppResult<Vec<TestimonialProfile>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {SELECT_COLS} FROM testimonials
               WHERE tenant_id = $1 AND status = 'approved'
               ORDER BY id DESC"#
        ))
        .bind(tenant_id)
        .fetch_all(self.pool())
        .await
        .map_err(AppError::from)?;
        rows.iter().map(row_to_profile).collect()
    }
}
