// src/handlers/activities.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::activity::{Activity, AppendActivityPayload},
};

#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "Activities",
    responses((status = 200, description = "Las 50 actividades más recientes, de la más nueva a la más vieja", body = [Activity])),
    security(("session_cookie" = []))
)]
pub async fn list_activities(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let activities = app_state.activity_recorder.list_recent().await?;
    Ok((StatusCode::OK, Json(activities)))
}

// Anexa una actividad explícita. El actor sale de la sesión; el cuerpo
// solo describe la acción, la entidad y el detalle.
#[utoipa::path(
    post,
    path = "/api/activities",
    tag = "Activities",
    request_body = AppendActivityPayload,
    responses(
        (status = 201, description = "Actividad registrada", body = Activity),
        (status = 400, description = "Acción o entidad fuera del vocabulario")
    ),
    security(("session_cookie" = []))
)]
pub async fn append_activity(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Json(payload): Json<AppendActivityPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let activity = app_state
        .activity_recorder
        .append_explicit(&actor, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}
