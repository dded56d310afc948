// src/models/employee.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::Role;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,

    #[schema(example = "Ana Pérez")]
    pub name: String,

    #[schema(example = "ana@gmail.com")]
    pub email: String,

    pub role: Role,

    #[schema(example = "Encargada de bodega")]
    pub position: Option<String>,

    // Referencia débil opcional para agrupar por sección
    #[serde(rename = "section")]
    pub section_id: Option<Uuid>,

    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload de creación y actualización de empleados
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    #[validate(required(message = "El nombre es requerido."))]
    #[schema(example = "Ana Pérez")]
    pub name: Option<String>,

    #[validate(
        required(message = "El email es requerido."),
        email(message = "Por favor, introduce un email válido.")
    )]
    #[schema(example = "ana@gmail.com")]
    pub email: Option<String>,

    pub role: Option<Role>,
    pub position: Option<String>,
    pub section: Option<Uuid>,
    pub hire_date: Option<DateTime<Utc>>,
}
