// src/db/activity_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::activity::{Activity, NewActivity},
};

// Las actividades solo se insertan y se leen: no hay UPDATE ni DELETE
// en este repositorio a propósito.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, activity: &NewActivity) -> Result<Activity, AppError> {
        let saved = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (actor_id, actor_name, action, entity, entity_id, article_code, article_name, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(activity.actor_id)
        .bind(&activity.actor_name)
        .bind(activity.action)
        .bind(activity.entity)
        .bind(activity.entity_id)
        .bind(&activity.article_code)
        .bind(&activity.article_name)
        .bind(&activity.details)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(
            "SELECT * FROM activities ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(activities)
    }
}
