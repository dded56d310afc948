// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::parse_id,
    middleware::auth::AuthenticatedUser,
    models::article::{
        Article, BulkImportReport, CreateArticlePayload, DUPLICATE_CODE_MSG, UpdateArticlePayload,
    },
};

const BAD_ID_MSG: &str = "ID de artículo no válido.";

// Resultado global del lote: todo creado, mezcla, o nada creado (409 si
// todos los fallos fueron códigos duplicados, 400 en cualquier otro caso).
fn bulk_status(report: &BulkImportReport) -> StatusCode {
    if report.errors.is_empty() {
        StatusCode::CREATED
    } else if report.created > 0 {
        StatusCode::MULTI_STATUS
    } else if report.errors.iter().all(|e| e.error == DUPLICATE_CODE_MSG) {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses((status = 200, description = "Artículos ordenados por nombre", body = [Article])),
    security(("session_cookie" = []))
)]
pub async fn list_articles(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let articles = app_state.inventory_service.list_articles().await?;
    Ok((StatusCode::OK, Json(articles)))
}

// Un objeto crea un artículo; un array dispara la carga masiva. La forma
// del cuerpo decide la rama.
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateArticlePayload,
    responses(
        (status = 201, description = "Artículo (o lote completo) creado", body = Article),
        (status = 207, description = "Carga masiva con resultado mixto", body = BulkImportReport),
        (status = 400, description = "Campos faltantes o ID de sección malformado"),
        (status = 404, description = "La sección asignada no existe"),
        (status = 409, description = "Código de artículo duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_or_import(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    match body {
        // Manejo de carga masiva
        Value::Array(rows) => {
            let report = app_state.inventory_service.bulk_import(&rows).await?;
            let status = bulk_status(&report);
            Ok((status, Json(report)).into_response())
        }

        // Manejo de creación de un solo artículo
        body => {
            let payload: CreateArticlePayload = serde_json::from_value(body).map_err(|_| {
                AppError::BadRequest("El cuerpo de la petición no es válido.".to_string())
            })?;
            payload.validate().map_err(AppError::ValidationError)?;

            let article = app_state
                .inventory_service
                .create_article(&actor, payload)
                .await?;

            Ok((StatusCode::CREATED, Json(article)).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID del artículo")),
    responses(
        (status = 200, body = Article),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Artículo no encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;
    let article = app_state.inventory_service.get_article(id).await?;
    Ok((StatusCode::OK, Json(article)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID del artículo")),
    request_body = UpdateArticlePayload,
    responses(
        (status = 200, body = Article),
        (status = 400, description = "ID malformado o campos requeridos ausentes"),
        (status = 404, description = "Artículo o sección no encontrados"),
        (status = 409, description = "Código de artículo duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let article = app_state
        .inventory_service
        .update_article(&actor, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(article)))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = String, Path, description = "ID del artículo")),
    responses(
        (status = 200, description = "Artículo eliminado"),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Artículo no encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;

    app_state
        .inventory_service
        .delete_article(&actor, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Artículo eliminado exitosamente." })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::article::BulkRowError;

    fn report(created: usize, errors: Vec<&str>) -> BulkImportReport {
        BulkImportReport {
            message: String::new(),
            created,
            errors: errors
                .into_iter()
                .map(|e| BulkRowError {
                    code: "X".into(),
                    error: e.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn full_success_is_created() {
        assert_eq!(bulk_status(&report(3, vec![])), StatusCode::CREATED);
    }

    #[test]
    fn mixed_outcome_is_multi_status() {
        assert_eq!(
            bulk_status(&report(2, vec!["Campos requeridos faltantes (name, code, units, price, section)."])),
            StatusCode::MULTI_STATUS
        );
    }

    #[test]
    fn all_duplicates_is_conflict() {
        assert_eq!(
            bulk_status(&report(0, vec![DUPLICATE_CODE_MSG, DUPLICATE_CODE_MSG])),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn no_valid_rows_is_bad_request() {
        assert_eq!(
            bulk_status(&report(0, vec!["Unidades o precio no son números válidos."])),
            StatusCode::BAD_REQUEST
        );
    }
}
