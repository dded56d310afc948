// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::logout,

        // --- Sections ---
        handlers::sections::list_sections,
        handlers::sections::create_section,
        handlers::sections::get_section,
        handlers::sections::update_section,
        handlers::sections::delete_section,

        // --- Inventory ---
        handlers::inventory::list_articles,
        handlers::inventory::create_or_import,
        handlers::inventory::get_article,
        handlers::inventory::update_article,
        handlers::inventory::delete_article,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,

        // --- Activities ---
        handlers::activities::list_activities,
        handlers::activities::append_activity,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::UserSummary,
            models::auth::LoginResponse,

            // --- Sections ---
            models::section::Section,
            models::section::SectionPayload,

            // --- Inventory ---
            models::article::Article,
            models::article::CreateArticlePayload,
            models::article::UpdateArticlePayload,
            models::article::BulkRowError,
            models::article::BulkImportReport,

            // --- Employees ---
            models::employee::Employee,
            models::employee::EmployeePayload,

            // --- Activities ---
            models::activity::ActivityAction,
            models::activity::ActivityEntity,
            models::activity::Activity,
            models::activity::AppendActivityPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Login y logout con cookie de sesión"),
        (name = "Sections", description = "Categorías del inventario"),
        (name = "Inventory", description = "Artículos y carga masiva"),
        (name = "Employees", description = "Gestión de empleados"),
        (name = "Activities", description = "Registro de auditoría")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
        );
    }
}
