// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, Role, User},
};

// Vida de la sesión: una hora, igual que el Max-Age de la cookie.
const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    // Intercambia credenciales por un token firmado. Email desconocido y
    // contraseña incorrecta devuelven exactamente el mismo error: la
    // respuesta no revela cuál de los dos factores falló.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // bcrypt es costoso: se ejecuta en un thread bloqueante
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falló la tarea de verificación de contraseña: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok((token, user))
    }

    // Valida el token de la cookie. No consulta la base de datos: la
    // sesión vive por completo en los claims firmados.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(TOKEN_TTL_SECS);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            name: user.name.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    // Siembra los usuarios de demostración la primera vez que la tabla
    // está vacía. Las contraseñas se hashean antes de persistir.
    pub async fn seed_default_users(&self) -> Result<(), AppError> {
        if self.user_repo.count().await? > 0 {
            return Ok(());
        }

        tracing::info!("No hay usuarios; sembrando la base de datos...");

        let defaults = [
            ("Admin User", "admin@gmail.com", "admin", Role::Admin),
            ("Jefe User", "jefe@gmail.com", "jefe", Role::Jefe),
            ("Empleado User", "empleado@gmail.com", "empleado", Role::Empleado),
        ];

        for (name, email, password, role) in defaults {
            let password_clone = password.to_owned();
            let hashed = tokio::task::spawn_blocking(move || {
                hash(&password_clone, bcrypt::DEFAULT_COST)
            })
            .await
            .map_err(|e| anyhow::anyhow!("Falló la tarea de hashing: {}", e))??;

            self.user_repo.create(name, email, &hashed, role).await?;
        }

        tracing::info!("Base de datos sembrada con 3 usuarios.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::postgres::PgPoolOptions;
    use uuid::Uuid;

    fn test_service(secret: &str) -> AuthService {
        // connect_lazy no abre ninguna conexión: los tests de tokens no
        // tocan la base de datos.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/inventario_test")
            .unwrap();
        AuthService::new(UserRepository::new(pool), secret.to_string())
    }

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Admin User".into(),
            email: "admin@gmail.com".into(),
            password_hash: "$2b$10$irrelevante".into(),
            role: Role::Admin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn token_round_trips_with_identical_claims() {
        let service = test_service("secreto-de-prueba");
        let user = test_user();

        let token = service.create_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.name, user.name);
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn token_expires_in_one_hour() {
        let service = test_service("secreto-de-prueba");
        let token = service.create_token(&test_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        let ttl = claims.exp as i64 - claims.iat as i64;
        assert_eq!(ttl, 3600);
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let service = test_service("secreto-de-prueba");
        let other = test_service("otro-secreto");
        let token = other.create_token(&test_user()).unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let service = test_service("secreto-de-prueba");
        assert!(matches!(
            service.validate_token("no-es-un-jwt"),
            Err(AppError::InvalidToken)
        ));
    }
}
