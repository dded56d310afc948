// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::SESSION_COOKIE,
    models::auth::{LoginPayload, LoginResponse, UserSummary},
};

// La cookie de sesión dura exactamente lo mismo que el token que lleva.
fn session_cookie(app_state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(app_state.cookie_secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::hours(1))
        .path("/")
        .build()
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Sesión iniciada; la cookie `token` viaja en la respuesta", body = LoginResponse),
        (status = 400, description = "Email o contraseña ausentes"),
        (status = 401, description = "Credenciales inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // validate() garantizó la presencia de ambos campos
    let email = payload.email.as_deref().unwrap();
    let password = payload.password.as_deref().unwrap();

    let (token, user) = app_state.auth_service.login_user(email, password).await?;

    let jar = jar.add(session_cookie(&app_state, token));
    let body = LoginResponse {
        message: "Login exitoso".to_string(),
        user: UserSummary::from(&user),
    };

    Ok((jar, Json(body)))
}

// Handler de logout: sobreescribe la cookie con un valor ya expirado.
// No hay estado de sesión que limpiar en el servidor.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie de sesión eliminada")
    )
)]
pub async fn logout(jar: CookieJar) -> Result<impl IntoResponse, AppError> {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    let jar = jar.remove(removal);

    Ok((jar, Json(json!({ "message": "Logout exitoso." }))))
}
