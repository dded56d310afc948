// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Acción y entidad son uniones cerradas: un valor fuera del enum no pasa
// la frontera de serde ni cabe en las columnas de Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_entity", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityEntity {
    Article,
    Section,
    Employee,
}

// Entrada de auditoría: se escribe una vez y nunca se modifica.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub actor_id: Uuid,

    #[schema(example = "Admin User")]
    pub actor_name: String,

    pub action: ActivityAction,
    pub entity: ActivityEntity,
    pub entity_id: Uuid,

    #[schema(example = "TAL-001")]
    pub article_code: Option<String>,

    #[schema(example = "Taladro")]
    pub article_name: Option<String>,

    #[schema(example = "units: 5 → 12")]
    pub details: Option<String>,

    pub created_at: DateTime<Utc>,
}

// Entrada de auditoría pendiente de insertar
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub actor_id: Uuid,
    pub actor_name: String,
    pub action: ActivityAction,
    pub entity: ActivityEntity,
    pub entity_id: Uuid,
    pub article_code: Option<String>,
    pub article_name: Option<String>,
    pub details: Option<String>,
}

// Payload para anexar una actividad explícita. El actor sale de la
// sesión, no del cuerpo de la petición.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppendActivityPayload {
    #[validate(required(message = "La acción es requerida."))]
    pub action: Option<ActivityAction>,

    #[validate(required(message = "La entidad es requerida."))]
    pub entity: Option<ActivityEntity>,

    #[validate(required(message = "El ID de la entidad es requerido."))]
    pub entity_id: Option<Uuid>,

    pub article_code: Option<String>,
    pub article_name: Option<String>,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_uses_lowercase_wire_format() {
        assert_eq!(
            serde_json::to_string(&ActivityAction::Updated).unwrap(),
            "\"updated\""
        );
        assert_eq!(
            serde_json::to_string(&ActivityEntity::Section).unwrap(),
            "\"section\""
        );
    }

    #[test]
    fn unknown_action_is_rejected_at_the_boundary() {
        let parsed: Result<AppendActivityPayload, _> =
            serde_json::from_str(r#"{ "action": "archived", "entity": "article" }"#);
        assert!(parsed.is_err());
    }
}
