// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación
    // no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    app_state
        .auth_service
        .seed_default_users()
        .await
        .expect("Falló la siembra de los usuarios iniciales.");

    // Rutas de autenticación (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    let section_routes = Router::new()
        .route(
            "/",
            get(handlers::sections::list_sections).post(handlers::sections::create_section),
        )
        .route(
            "/{id}",
            get(handlers::sections::get_section)
                .put(handlers::sections::update_section)
                .delete(handlers::sections::delete_section),
        );

    let inventory_routes = Router::new()
        .route(
            "/",
            get(handlers::inventory::list_articles).post(handlers::inventory::create_or_import),
        )
        .route(
            "/{id}",
            get(handlers::inventory::get_article)
                .put(handlers::inventory::update_article)
                .delete(handlers::inventory::delete_article),
        );

    let employee_routes = Router::new()
        .route(
            "/",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        );

    let activity_routes = Router::new().route(
        "/",
        get(handlers::activities::list_activities).post(handlers::activities::append_activity),
    );

    // Todo lo que toca datos exige la cookie de sesión
    let protected_routes = Router::new()
        .nest("/api/sections", section_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/employees", employee_routes)
        .nest("/api/activities", activity_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina todo en el router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia el servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falló el arranque del listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
