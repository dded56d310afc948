// src/handlers/employees.rs

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
    models::{
        auth::Role,
        employee::{Employee, EmployeePayload},
    },
};

const BAD_ID_MSG: &str = "ID de empleado no válido.";
const NOT_FOUND_MSG: &str = "Empleado no encontrado.";
const SECTION_MISSING_MSG: &str = "La sección asignada no existe.";

// La sección de un empleado es opcional; cuando viene, debe existir.
async fn check_section(app_state: &AppState, payload: &EmployeePayload) -> Result<(), AppError> {
    if let Some(section_id) = payload.section {
        if !app_state.section_repo.exists(section_id).await? {
            return Err(AppError::NotFound(SECTION_MISSING_MSG.to_string()));
        }
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    responses((status = 200, description = "Empleados ordenados por nombre", body = [Employee])),
    security(("session_cookie" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.employee_repo.find_all().await?;
    Ok((StatusCode::OK, Json(employees)))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Empleado creado", body = Employee),
        (status = 400, description = "Campos requeridos ausentes"),
        (status = 409, description = "Email duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    check_section(&app_state, &payload).await?;

    let employee = app_state
        .employee_repo
        .create(
            payload.name.as_deref().unwrap(),
            payload.email.as_deref().unwrap(),
            payload.role.unwrap_or(Role::Empleado),
            payload.position.as_deref(),
            payload.section,
            payload.hire_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "ID del empleado")),
    responses(
        (status = 200, body = Employee),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Empleado no encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;

    let employee = app_state
        .employee_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    Ok((StatusCode::OK, Json(employee)))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "ID del empleado")),
    request_body = EmployeePayload,
    responses(
        (status = 200, body = Employee),
        (status = 400, description = "ID malformado o campos ausentes"),
        (status = 404, description = "Empleado o sección no encontrados"),
        (status = 409, description = "Email duplicado")
    ),
    security(("session_cookie" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;
    payload.validate().map_err(AppError::ValidationError)?;
    check_section(&app_state, &payload).await?;

    let existing = app_state
        .employee_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    let employee = app_state
        .employee_repo
        .update(
            id,
            payload.name.as_deref().unwrap(),
            payload.email.as_deref().unwrap(),
            payload.role.unwrap_or(existing.role),
            payload.position.as_deref().or(existing.position.as_deref()),
            payload.section.or(existing.section_id),
            payload.hire_date,
        )
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MSG.to_string()))?;

    Ok((StatusCode::OK, Json(employee)))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    params(("id" = String, Path, description = "ID del empleado")),
    responses(
        (status = 200, description = "Empleado eliminado"),
        (status = 400, description = "ID malformado"),
        (status = 404, description = "Empleado no encontrado")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id, BAD_ID_MSG)?;

    if !app_state.employee_repo.delete(id).await? {
        return Err(AppError::NotFound(NOT_FOUND_MSG.to_string()));
    }

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Empleado eliminado exitosamente." })),
    ))
}
