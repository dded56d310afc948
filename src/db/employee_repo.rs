// src/db/employee_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{auth::Role, employee::Employee},
};

const DUPLICATE_EMAIL_MSG: &str = "Ya existe un empleado con ese email.";

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let maybe_employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_employee)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        role: Role,
        position: Option<&str>,
        section_id: Option<Uuid>,
        hire_date: Option<DateTime<Utc>>,
    ) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, email, role, position, section_id, hire_date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()))
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(position)
        .bind(section_id)
        .bind(hire_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(DUPLICATE_EMAIL_MSG.to_string());
                }
            }
            e.into()
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        email: &str,
        role: Role,
        position: Option<&str>,
        section_id: Option<Uuid>,
        hire_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Employee>, AppError> {
        sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET name = $2, email = $3, role = $4, position = $5, section_id = $6,
                hire_date = COALESCE($7, hire_date), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(position)
        .bind(section_id)
        .bind(hire_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(DUPLICATE_EMAIL_MSG.to_string());
                }
            }
            e.into()
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
