// src/models/section.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Una sección no es dueña de sus artículos: ellos guardan una referencia
// débil hacia ella y el borrado no se propaga.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,

    #[schema(example = "Herramientas")]
    pub name: String,

    #[schema(example = "Taladros, llaves y destornilladores")]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload de creación y actualización (el nombre siempre es requerido)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SectionPayload {
    #[validate(required(message = "El nombre de la sección es requerido."))]
    #[schema(example = "Herramientas")]
    pub name: Option<String>,

    pub description: Option<String>,
}
