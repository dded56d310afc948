// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Rol compartido entre usuarios y empleados.
// Se guarda en Postgres como el enum 'user_role'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Jefe,
    Empleado,
}

// Representa un usuario que viene de la base de datos
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE: el hash nunca sale en las respuestas
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Datos para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(
        required(message = "Email y contraseña son requeridos."),
        email(message = "Por favor, introduce un email válido.")
    )]
    #[schema(example = "admin@gmail.com")]
    pub email: Option<String>,

    #[validate(required(message = "Email y contraseña son requeridos."))]
    #[schema(example = "admin")]
    pub password: Option<String>,
}

// Resumen del usuario que devuelve el login (sin hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

// Respuesta de login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login exitoso")]
    pub message: String,
    pub user: UserSummary,
}

// Estructura de datos ("claims") dentro del JWT.
// La sesión es puramente declarativa: todo lo que el guard necesita
// viaja firmado dentro del token, sin estado en el servidor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // ID del usuario
    pub email: String,
    pub role: Role,
    pub name: String,
    pub exp: usize, // Expiration time (una hora después de emitido)
    pub iat: usize, // Issued At
}

// Usuario autenticado, reconstruido desde los claims del token
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Jefe).unwrap(), "\"jefe\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn role_rejects_unknown_values() {
        let parsed: Result<Role, _> = serde_json::from_str("\"gerente\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Admin User".into(),
            email: "admin@gmail.com".into(),
            password_hash: "$2b$10$secreto".into(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secreto"));
        assert!(!json.contains("passwordHash"));
    }

    #[test]
    fn login_payload_requires_both_fields() {
        let payload = LoginPayload {
            email: Some("admin@gmail.com".into()),
            password: None,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
