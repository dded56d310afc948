// src/services/inventory.rs

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ArticleRepository, SectionRepository},
    models::{
        activity::ActivityAction,
        article::{
            Article, BulkImportReport, BulkRowError, CreateArticlePayload, DUPLICATE_CODE_MSG,
            NewArticle, UpdateArticlePayload,
        },
        auth::CurrentUser,
        section::Section,
    },
    services::activity::{ActivityRecorder, article_diff},
};

const MISSING_FIELDS_MSG: &str =
    "Campos requeridos faltantes (name, code, units, price, section).";
const BAD_NUMBERS_MSG: &str = "Unidades o precio no son números válidos.";
const SECTION_MISSING_MSG: &str = "La sección asignada no existe.";
const ARTICLE_NOT_FOUND_MSG: &str = "Artículo no encontrado.";

#[derive(Clone)]
pub struct InventoryService {
    article_repo: ArticleRepository,
    section_repo: SectionRepository,
    recorder: ActivityRecorder,
}

impl InventoryService {
    pub fn new(
        article_repo: ArticleRepository,
        section_repo: SectionRepository,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            article_repo,
            section_repo,
            recorder,
        }
    }

    pub async fn list_articles(&self) -> Result<Vec<Article>, AppError> {
        self.article_repo.find_all().await
    }

    pub async fn get_article(&self, id: Uuid) -> Result<Article, AppError> {
        self.article_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(ARTICLE_NOT_FOUND_MSG.to_string()))
    }

    // --- CREACIÓN INDIVIDUAL ---
    // Todas las comprobaciones de dominio ocurren antes de escribir;
    // una vez emitido el INSERT solo se reinterpreta el conflicto de
    // unicidad que reporte la base de datos.
    pub async fn create_article(
        &self,
        actor: &CurrentUser,
        payload: CreateArticlePayload,
    ) -> Result<Article, AppError> {
        // validate() ya garantizó la presencia de los requeridos
        let section_id = payload.section.unwrap();

        if !self.section_repo.exists(section_id).await? {
            return Err(AppError::NotFound(SECTION_MISSING_MSG.to_string()));
        }

        let code = payload.code.unwrap();
        if self.article_repo.find_by_code(&code).await?.is_some() {
            return Err(AppError::Conflict(DUPLICATE_CODE_MSG.to_string()));
        }

        let new_article = NewArticle {
            code,
            name: payload.name.unwrap(),
            brand: payload.brand,
            units: payload.units.unwrap(),
            price: payload.price.unwrap(),
            reference: payload.reference,
            description: payload.description,
            section_id,
        };

        let saved = self.article_repo.create(&new_article).await?;

        self.recorder
            .record_article(actor, ActivityAction::Created, &saved, None)
            .await;

        Ok(saved)
    }

    // --- ACTUALIZACIÓN ---
    // La sección se revalida aunque no haya cambiado. Los campos no
    // enviados conservan su valor guardado.
    pub async fn update_article(
        &self,
        actor: &CurrentUser,
        id: Uuid,
        payload: UpdateArticlePayload,
    ) -> Result<Article, AppError> {
        let old = self
            .article_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(ARTICLE_NOT_FOUND_MSG.to_string()))?;

        let section_id = payload.section.unwrap();
        if !self.section_repo.exists(section_id).await? {
            return Err(AppError::NotFound(SECTION_MISSING_MSG.to_string()));
        }

        let price = payload.effective_price().unwrap_or(old.price);
        let merged = NewArticle {
            code: payload.code.unwrap_or_else(|| old.code.clone()),
            name: payload.name.unwrap(),
            brand: payload.brand.clone().or_else(|| old.brand.clone()),
            units: payload.units.unwrap(),
            price,
            reference: payload.reference.clone().or_else(|| old.reference.clone()),
            description: payload
                .description
                .clone()
                .or_else(|| old.description.clone()),
            section_id,
        };

        let updated = self
            .article_repo
            .update(id, &merged)
            .await?
            .ok_or_else(|| AppError::NotFound(ARTICLE_NOT_FOUND_MSG.to_string()))?;

        let details = article_diff(&old, &updated);
        self.recorder
            .record_article(actor, ActivityAction::Updated, &updated, Some(details))
            .await;

        Ok(updated)
    }

    pub async fn delete_article(&self, actor: &CurrentUser, id: Uuid) -> Result<(), AppError> {
        let article = self
            .article_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(ARTICLE_NOT_FOUND_MSG.to_string()))?;

        if !self.article_repo.delete(id).await? {
            return Err(AppError::NotFound(ARTICLE_NOT_FOUND_MSG.to_string()));
        }

        self.recorder
            .record_article(actor, ActivityAction::Deleted, &article, None)
            .await;

        Ok(())
    }

    // --- CARGA MASIVA ---
    // Mejor esfuerzo: cada fila válida se inserta por separado, de modo
    // que una fila que falla nunca bloquea a las demás. El lote no es
    // transaccional a propósito.
    pub async fn bulk_import(&self, rows: &[Value]) -> Result<BulkImportReport, AppError> {
        let sections = self.section_repo.find_all().await?;
        let lookup = build_section_lookup(&sections);

        let (valid, mut errors) = partition_bulk_rows(rows, &lookup);

        let mut created = 0usize;
        for row in &valid {
            match self.article_repo.create(row).await {
                Ok(_) => created += 1,
                // El duplicado de una fila se vuelve un fallo puntual
                // sin descartar las filas que sí entraron.
                Err(AppError::Conflict(reason)) => errors.push(BulkRowError {
                    code: row.code.clone(),
                    error: reason,
                }),
                Err(other) => return Err(other),
            }
        }

        let mut message = format!("{} artículos han sido creados.", created);
        if !errors.is_empty() {
            message.push_str(&format!(
                " {} artículos no se pudieron crear.",
                errors.len()
            ));
        }

        Ok(BulkImportReport {
            message,
            created,
            errors,
        })
    }
}

/// Índice de nombre de sección (en minúsculas) a su identificador.
/// Se construye con una sola carga de secciones por lote.
pub fn build_section_lookup(sections: &[Section]) -> HashMap<String, Uuid> {
    sections
        .iter()
        .map(|s| (s.name.to_lowercase(), s.id))
        .collect()
}

/// Separa las filas crudas del lote en insertables e inválidas, cada
/// inválida con el código original (si lo hay) y la razón del rechazo.
/// Función pura: no toca la base de datos.
pub fn partition_bulk_rows(
    rows: &[Value],
    lookup: &HashMap<String, Uuid>,
) -> (Vec<NewArticle>, Vec<BulkRowError>) {
    let mut valid = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        let code = row_string(row, "code");
        let error_code = code.clone().unwrap_or_else(|| "N/A".to_string());

        let name = row_string(row, "name");
        let section_name = row_string(row, "section");
        let units_present = row.get("units").is_some_and(|v| !v.is_null());
        let price_present = row.get("price").is_some_and(|v| !v.is_null());

        if name.is_none()
            || code.is_none()
            || section_name.is_none()
            || !units_present
            || !price_present
        {
            errors.push(BulkRowError {
                code: error_code,
                error: MISSING_FIELDS_MSG.to_string(),
            });
            continue;
        }
        let section_name = section_name.unwrap();

        let units = row.get("units").and_then(parse_units);
        let price = row.get("price").and_then(parse_decimal);
        let (units, price) = match (units, price) {
            (Some(u), Some(p)) if u >= 0 && !p.is_sign_negative() => (u, p),
            _ => {
                errors.push(BulkRowError {
                    code: error_code,
                    error: BAD_NUMBERS_MSG.to_string(),
                });
                continue;
            }
        };

        let Some(section_id) = lookup.get(&section_name.to_lowercase()).copied() else {
            errors.push(BulkRowError {
                code: error_code,
                error: format!("La sección '{}' no fue encontrada.", section_name),
            });
            continue;
        };

        valid.push(NewArticle {
            code: code.unwrap(),
            name: name.unwrap(),
            brand: row_string(row, "brand"),
            units,
            price,
            reference: row_string(row, "reference"),
            description: row_string(row, "description"),
            section_id,
        });
    }

    (valid, errors)
}

fn row_string(row: &Value, key: &str) -> Option<String> {
    row.get(key)?
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Las filas vienen de texto delimitado: un número puede llegar como
// número JSON o como cadena numérica.
fn parse_units(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i).ok()
            } else {
                let f = n.as_f64()?;
                (f.fract() == 0.0).then_some(f as i32)
            }
        }
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lookup_with(name: &str) -> (HashMap<String, Uuid>, Uuid) {
        let id = Uuid::new_v4();
        let mut map = HashMap::new();
        map.insert(name.to_lowercase(), id);
        (map, id)
    }

    #[test]
    fn partitions_valid_and_invalid_rows() {
        let (lookup, section_id) = lookup_with("Herramientas");
        let rows = vec![
            json!({ "code": "TAL-001", "name": "Taladro", "units": 15, "price": 120.5,
                    "section": "Herramientas" }),
            json!({ "code": "MAR-002", "name": "Martillo", "units": 4, "price": 30,
                    "section": "Jardinería" }),
            json!({ "name": "Sin código", "units": 1, "price": 5, "section": "Herramientas" }),
            json!({ "code": "LLA-003", "name": "Llave", "units": "muchas", "price": 12,
                    "section": "Herramientas" }),
        ];

        let (valid, errors) = partition_bulk_rows(&rows, &lookup);

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].code, "TAL-001");
        assert_eq!(valid[0].section_id, section_id);

        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].code, "MAR-002");
        assert_eq!(errors[0].error, "La sección 'Jardinería' no fue encontrada.");
        assert_eq!(errors[1].code, "N/A");
        assert_eq!(errors[1].error, MISSING_FIELDS_MSG);
        assert_eq!(errors[2].code, "LLA-003");
        assert_eq!(errors[2].error, BAD_NUMBERS_MSG);
    }

    #[test]
    fn section_names_resolve_case_insensitively() {
        let (lookup, section_id) = lookup_with("Herramientas");
        let rows = vec![json!({ "code": "TAL-001", "name": "Taladro", "units": 1,
                                "price": 9.99, "section": "HERRAMIENTAS" })];

        let (valid, errors) = partition_bulk_rows(&rows, &lookup);

        assert!(errors.is_empty());
        assert_eq!(valid[0].section_id, section_id);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let (lookup, _) = lookup_with("Herramientas");
        let rows = vec![json!({ "code": "TAL-001", "name": "Taladro", "units": "15",
                                "price": "120.5", "section": "Herramientas" })];

        let (valid, errors) = partition_bulk_rows(&rows, &lookup);

        assert!(errors.is_empty());
        assert_eq!(valid[0].units, 15);
        assert_eq!(valid[0].price, Decimal::from_str("120.5").unwrap());
    }

    #[test]
    fn negative_numbers_are_rejected_per_row() {
        let (lookup, _) = lookup_with("Herramientas");
        let rows = vec![json!({ "code": "TAL-001", "name": "Taladro", "units": -2,
                                "price": 10, "section": "Herramientas" })];

        let (valid, errors) = partition_bulk_rows(&rows, &lookup);

        assert!(valid.is_empty());
        assert_eq!(errors[0].error, BAD_NUMBERS_MSG);
    }

    #[test]
    fn optional_fields_pass_through() {
        let (lookup, _) = lookup_with("Herramientas");
        let rows = vec![json!({ "code": "TAL-001", "name": "Taladro", "units": 1,
                                "price": 10, "section": "Herramientas",
                                "brand": "Makita", "reference": "REF-9" })];

        let (valid, _) = partition_bulk_rows(&rows, &lookup);

        assert_eq!(valid[0].brand.as_deref(), Some("Makita"));
        assert_eq!(valid[0].reference.as_deref(), Some("REF-9"));
        assert!(valid[0].description.is_none());
    }

    #[test]
    fn empty_batch_yields_nothing() {
        let (lookup, _) = lookup_with("Herramientas");
        let (valid, errors) = partition_bulk_rows(&[], &lookup);
        assert!(valid.is_empty());
        assert!(errors.is_empty());
    }
}
