// src/db/section_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::section::Section};

fn duplicate_name_error(name: &str) -> String {
    format!("Ya existe una sección con el nombre \"{}\".", name)
}

#[derive(Clone)]
pub struct SectionRepository {
    pool: PgPool,
}

impl SectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Section>, AppError> {
        let sections = sqlx::query_as::<_, Section>("SELECT * FROM sections ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(sections)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Section>, AppError> {
        let maybe_section = sqlx::query_as::<_, Section>("SELECT * FROM sections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_section)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM sections WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Section, AppError> {
        sqlx::query_as::<_, Section>(
            "INSERT INTO sections (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(duplicate_name_error(name));
                }
            }
            e.into()
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<Section>, AppError> {
        sqlx::query_as::<_, Section>(
            r#"
            UPDATE sections
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(duplicate_name_error(name));
                }
            }
            e.into()
        })
    }

    // El borrado no toca los artículos que aún apuntan a la sección:
    // la referencia queda colgando a propósito (ver DESIGN.md).
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
