// src/services/activity.rs

use crate::{
    common::error::AppError,
    db::ActivityRepository,
    models::{
        activity::{Activity, ActivityAction, ActivityEntity, AppendActivityPayload, NewActivity},
        article::Article,
        auth::CurrentUser,
        section::Section,
    },
};

// Tope fijo del listado de actividades recientes.
const RECENT_LIMIT: i64 = 50;

pub const NO_CHANGES_MSG: &str = "Sin cambios detectados.";

#[derive(Clone)]
pub struct ActivityRecorder {
    activity_repo: ActivityRepository,
}

impl ActivityRecorder {
    pub fn new(activity_repo: ActivityRepository) -> Self {
        Self { activity_repo }
    }

    pub async fn list_recent(&self) -> Result<Vec<Activity>, AppError> {
        self.activity_repo.find_recent(RECENT_LIMIT).await
    }

    // Anexa una actividad explícita vía POST /api/activities. A diferencia
    // del registro automático, aquí el fallo sí llega al cliente.
    pub async fn append_explicit(
        &self,
        actor: &CurrentUser,
        payload: AppendActivityPayload,
    ) -> Result<Activity, AppError> {
        let activity = NewActivity {
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            // validate() ya garantizó la presencia de estos campos
            action: payload.action.unwrap(),
            entity: payload.entity.unwrap(),
            entity_id: payload.entity_id.unwrap(),
            article_code: payload.article_code,
            article_name: payload.article_name,
            details: payload.details,
        };
        self.activity_repo.insert(&activity).await
    }

    // Registro automático tras una mutación exitosa. Si la auditoría
    // falla, la operación principal no se deshace: el error queda solo
    // en el log del servidor.
    pub async fn record(&self, activity: NewActivity) {
        if let Err(e) = self.activity_repo.insert(&activity).await {
            tracing::warn!("No se pudo registrar la actividad: {}", e);
        }
    }

    pub async fn record_article(
        &self,
        actor: &CurrentUser,
        action: ActivityAction,
        article: &Article,
        details: Option<String>,
    ) {
        self.record(NewActivity {
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            action,
            entity: ActivityEntity::Article,
            entity_id: article.id,
            article_code: Some(article.code.clone()),
            article_name: Some(article.name.clone()),
            details,
        })
        .await;
    }

    pub async fn record_section(
        &self,
        actor: &CurrentUser,
        action: ActivityAction,
        section: &Section,
        details: Option<String>,
    ) {
        self.record(NewActivity {
            actor_id: actor.id,
            actor_name: actor.name.clone(),
            action,
            entity: ActivityEntity::Section,
            entity_id: section.id,
            article_code: None,
            article_name: None,
            details: details.or_else(|| Some(section.name.clone())),
        })
        .await;
    }
}

fn push_change(changes: &mut Vec<String>, field: &str, old: impl ToString, new: impl ToString) {
    let (old, new) = (old.to_string(), new.to_string());
    if old != new {
        changes.push(format!("{}: {} → {}", field, old, new));
    }
}

fn opt_text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Enumera solo los campos que cambiaron, como `campo: viejo → nuevo`.
pub fn article_diff(old: &Article, new: &Article) -> String {
    let mut changes = Vec::new();
    push_change(&mut changes, "code", &old.code, &new.code);
    push_change(&mut changes, "name", &old.name, &new.name);
    push_change(&mut changes, "brand", opt_text(&old.brand), opt_text(&new.brand));
    push_change(&mut changes, "units", old.units, new.units);
    push_change(&mut changes, "price", old.price, new.price);
    push_change(
        &mut changes,
        "reference",
        opt_text(&old.reference),
        opt_text(&new.reference),
    );
    push_change(
        &mut changes,
        "description",
        opt_text(&old.description),
        opt_text(&new.description),
    );
    push_change(&mut changes, "section", old.section_id, new.section_id);

    if changes.is_empty() {
        NO_CHANGES_MSG.to_string()
    } else {
        changes.join(", ")
    }
}

pub fn section_diff(old: &Section, new: &Section) -> String {
    let mut changes = Vec::new();
    push_change(&mut changes, "name", &old.name, &new.name);
    push_change(
        &mut changes,
        "description",
        opt_text(&old.description),
        opt_text(&new.description),
    );

    if changes.is_empty() {
        NO_CHANGES_MSG.to_string()
    } else {
        changes.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn base_article() -> Article {
        Article {
            id: Uuid::new_v4(),
            code: "TAL-001".into(),
            name: "Taladro".into(),
            brand: None,
            units: 5,
            price: Decimal::new(12050, 2),
            reference: None,
            description: None,
            section_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn diff_mentions_only_the_changed_field() {
        let old = base_article();
        let mut new = old.clone();
        new.units = 12;

        assert_eq!(article_diff(&old, &new), "units: 5 → 12");
    }

    #[test]
    fn diff_without_changes_says_so() {
        let article = base_article();
        assert_eq!(article_diff(&article, &article), NO_CHANGES_MSG);
    }

    #[test]
    fn diff_joins_multiple_changes() {
        let old = base_article();
        let mut new = old.clone();
        new.units = 12;
        new.brand = Some("Makita".into());

        assert_eq!(article_diff(&old, &new), "brand: - → Makita, units: 5 → 12");
    }

    #[test]
    fn section_diff_tracks_name_and_description() {
        let old = Section {
            id: Uuid::new_v4(),
            name: "Herramientas".into(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut new = old.clone();
        new.name = "Ferretería".into();

        assert_eq!(section_diff(&old, &new), "name: Herramientas → Ferretería");
    }
}
