// src/db/article_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::article::{Article, DUPLICATE_CODE_MSG, NewArticle},
};

#[derive(Clone)]
pub struct ArticleRepository {
    pool: PgPool,
}

impl ArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Article>, AppError> {
        let articles = sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError> {
        let maybe_article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_article)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Article>, AppError> {
        let maybe_article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_article)
    }

    // Inserta un artículo. Dos inserciones concurrentes con el mismo
    // código se resuelven aquí: la restricción única de Postgres gana y
    // el conflicto se traduce a un error de dominio.
    pub async fn create(&self, article: &NewArticle) -> Result<Article, AppError> {
        sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (code, name, brand, units, price, reference, description, section_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&article.code)
        .bind(&article.name)
        .bind(&article.brand)
        .bind(article.units)
        .bind(article.price)
        .bind(&article.reference)
        .bind(&article.description)
        .bind(article.section_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(DUPLICATE_CODE_MSG.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn update(&self, id: Uuid, article: &NewArticle) -> Result<Option<Article>, AppError> {
        sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET code = $2, name = $3, brand = $4, units = $5, price = $6,
                reference = $7, description = $8, section_id = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&article.code)
        .bind(&article.name)
        .bind(&article.brand)
        .bind(article.units)
        .bind(article.price)
        .bind(&article.reference)
        .bind(&article.description)
        .bind(article.section_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(DUPLICATE_CODE_MSG.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
