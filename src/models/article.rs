// src/models/article.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Valida que un decimal no sea negativo (precio)
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("El valor no puede ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// Un artículo del inventario. `section_id` debe resolver a una sección
// existente en el momento de cada escritura; la base de datos no lo
// garantiza (referencia débil, sin cascada).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,

    #[schema(example = "TAL-001")]
    pub code: String,

    #[schema(example = "Taladro")]
    pub name: String,

    pub brand: Option<String>,

    #[schema(example = 15)]
    pub units: i32,

    #[schema(example = 120.5)]
    pub price: Decimal,

    pub reference: Option<String>,
    pub description: Option<String>,

    #[serde(rename = "section")]
    pub section_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DUPLICATE_CODE_MSG: &str = "El código de artículo ya existe.";

// Fallo puntual de una fila de la carga masiva
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BulkRowError {
    #[schema(example = "TAL-001")]
    pub code: String,

    #[schema(example = "La sección 'Herramientas' no fue encontrada.")]
    pub error: String,
}

// Resumen de la carga masiva: cuántas filas entraron y por qué fallaron
// las demás. Las filas válidas ya quedaron persistidas aunque otras
// hayan fallado.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkImportReport {
    #[schema(example = "3 artículos han sido creados. 1 artículos no se pudieron crear.")]
    pub message: String,
    pub created: usize,
    pub errors: Vec<BulkRowError>,
}

// Fila lista para insertar: ya validada y con la sección resuelta.
// La produce tanto la creación individual como el motor de carga masiva.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub code: String,
    pub name: String,
    pub brand: Option<String>,
    pub units: i32,
    pub price: Decimal,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub section_id: Uuid,
}

// Payload de creación de un solo artículo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticlePayload {
    #[validate(required(message = "El código es requerido."))]
    #[schema(example = "TAL-001")]
    pub code: Option<String>,

    #[validate(required(message = "El nombre es requerido."))]
    #[schema(example = "Taladro")]
    pub name: Option<String>,

    pub brand: Option<String>,

    #[validate(
        required(message = "Las unidades son requeridas."),
        range(min = 0, message = "El valor no puede ser negativo.")
    )]
    #[schema(example = 15)]
    pub units: Option<i32>,

    #[validate(
        required(message = "El precio es requerido."),
        custom(function = validate_not_negative)
    )]
    #[schema(example = 120.5)]
    pub price: Option<Decimal>,

    pub reference: Option<String>,
    pub description: Option<String>,

    #[validate(required(message = "La sección es requerida."))]
    pub section: Option<Uuid>,
}

// Payload de actualización. Nombre, unidades y sección son requeridos;
// el resto conserva el valor guardado si no se envía.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticlePayload {
    pub code: Option<String>,

    #[validate(required(message = "Nombre y unidades son requeridos."))]
    pub name: Option<String>,

    pub brand: Option<String>,

    #[validate(
        required(message = "Nombre y unidades son requeridos."),
        range(min = 0, message = "El valor no puede ser negativo.")
    )]
    pub units: Option<i32>,

    #[validate(custom(function = validate_not_negative))]
    pub price: Option<Decimal>,

    // Alias del esquema viejo de cuatro campos; su uso queda registrado
    // y migra hacia `price`.
    #[validate(custom(function = validate_not_negative))]
    pub unit_price: Option<Decimal>,

    pub reference: Option<String>,
    pub description: Option<String>,

    #[validate(required(message = "La sección es requerida."))]
    pub section: Option<Uuid>,
}

impl UpdateArticlePayload {
    /// Precio efectivo del payload: `price` manda; `unitPrice` se acepta
    /// como alias del esquema anterior y su uso se registra en el log.
    pub fn effective_price(&self) -> Option<Decimal> {
        if self.price.is_some() {
            return self.price;
        }
        if self.unit_price.is_some() {
            tracing::warn!("payload de artículo usa el campo obsoleto 'unitPrice'; migrando a 'price'");
        }
        self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_reports_missing_fields() {
        let payload: CreateArticlePayload =
            serde_json::from_str(r#"{ "name": "Taladro", "units": 15 }"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("code"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("section"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn create_payload_rejects_negative_price() {
        let payload: CreateArticlePayload = serde_json::from_str(
            r#"{ "code": "TAL-001", "name": "Taladro", "units": 1, "price": -3.5,
                 "section": "550e8400-e29b-41d4-a716-446655440000" }"#,
        )
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn update_payload_prefers_price_over_legacy_alias() {
        let payload: UpdateArticlePayload = serde_json::from_str(
            r#"{ "name": "Taladro", "units": 5, "price": 99.9, "unitPrice": 11.1,
                 "section": "550e8400-e29b-41d4-a716-446655440000" }"#,
        )
        .unwrap();
        assert_eq!(payload.effective_price(), Some(Decimal::new(999, 1)));
    }

    #[test]
    fn update_payload_falls_back_to_unit_price() {
        let payload: UpdateArticlePayload = serde_json::from_str(
            r#"{ "name": "Taladro", "units": 5, "unitPrice": 11.1,
                 "section": "550e8400-e29b-41d4-a716-446655440000" }"#,
        )
        .unwrap();
        assert_eq!(payload.effective_price(), Some(Decimal::new(111, 1)));
    }
}
