// src/handlers/sections.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::parse_id,
    middleware::auth::AuthenticatedUser,
    models::{activity::ActivityAction, section::{Section, SectionPayload}},
    services::activity::section_diff,
};

const BAD_ID_MSG: &str = "ID de sección no válido.";
const NOT_FOUND_MSG: &str = "Sección no encontrada.";

#[utoipa::path(
    get,
    path = "/api/sections",
    tag = "Sections",
    responses((status = 200, description = "Secciones ordenadas por nombre", body = [Section])),
    security(("session_cookie" = []))
)]
pub async fn list_sections(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sections = app_state.section_repo.find_all().await?;
    Ok((StatusCode::OK, Json(sections)))
}

#[utoipa::path(
    post,
    path = "/api/sections",
    tag = "Sections",
    request_body = SectionPayload,
    responses(
        (status = 201, description = "Sección creada", body = Section),
        (status = 400, description = "Nombre ausente"),
        (status = 409, description = "Nombre duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_section(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let name = payload.name.as_deref().unwrap();
    let section = app_state
        .section_repo
        .create(name, payload.description.as_deref())
        .await?;

    app_state
        .activity_recorder
        .record_section(&actor, ActivityAction::Created, &section, None)
        .await;

    Ok((StatusCode::CREATED, Json(section)))
}

#[utoipa::path(
    get,
    path = "/api/sections/{id}",
    tag = "Sections",
    params(("id" = String, Path, description = "ID de la sección")),
    responses(
        (status = 200, body = Section),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Sección no encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_section(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;

    let section = app_state
        .section_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    Ok((StatusCode::OK, Json(section)))
}

#[utoipa::path(
    put,
    path = "/api/sections/{id}",
    tag = "Sections",
    params(("id" = String, Path, description = "ID de la sección")),
    request_body = SectionPayload,
    responses(
        (status = 200, body = Section),
        (status = 400, description = "ID malformado o nombre ausente"),
        (status = 404, description = "Sección no encontrada"),
        (status = 409, description = "Nombre duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_section(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<SectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;
    payload.validate().map_err(AppError::ValidationError)?;

    let old = app_state
        .section_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    let name = payload.name.as_deref().unwrap();
    let updated = app_state
        .section_repo
        .update(id, name, payload.description.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    let details = section_diff(&old, &updated);
    app_state
        .activity_recorder
        .record_section(&actor, ActivityAction::Updated, &updated, Some(details))
        .await;

    Ok((StatusCode::OK, Json(updated)))
}

// El borrado no comprueba artículos dependientes: sus referencias quedan
// colgando (ver DESIGN.md, política de borrado de secciones).
#[utoipa::path(
    delete,
    path = "/api/sections/{id}",
    tag = "Sections",
    params(("id" = String, Path, description = "ID de la sección")),
    responses(
        (status = 200, description = "Sección eliminada"),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Sección no encontrada")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_section(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;

    let section = app_state
        .section_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    if !app_state.section_repo.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MSG.to_string()));
    }

    app_state
        .activity_recorder
        .record_section(&actor, ActivityAction::Deleted, &section, None)
        .await;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Sección eliminada exitosamente." })),
    ))
}
