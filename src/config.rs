// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, ArticleRepository, EmployeeRepository, SectionRepository,
        UserRepository,
    },
    services::{ActivityRecorder, AuthService, InventoryService},
};

// Estado compartido del proceso. El pool se construye una sola vez aquí
// y viaja inyectado a cada handler; no hay caches globales perezosos.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    // La cookie solo lleva Secure fuera de desarrollo
    pub cookie_secure: bool,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub activity_recorder: ActivityRecorder,
    pub section_repo: SectionRepository,
    pub employee_repo: EmployeeRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");
        let cookie_secure = env::var("APP_ENV")
            .map(|v| v != "development")
            .unwrap_or(true);

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let section_repo = SectionRepository::new(db_pool.clone());
        let article_repo = ArticleRepository::new(db_pool.clone());
        let employee_repo = EmployeeRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());

        let activity_recorder = ActivityRecorder::new(activity_repo);
        let auth_service = AuthService::new(user_repo, jwt_secret);
        let inventory_service = InventoryService::new(
            article_repo,
            section_repo.clone(),
            activity_recorder.clone(),
        );

        Ok(Self {
            db_pool,
            cookie_secure,
            auth_service,
            inventory_service,
            activity_recorder,
            section_repo,
            employee_repo,
        })
    }
}
