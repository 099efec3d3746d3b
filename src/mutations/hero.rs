use crate::database::models::HeroRow;
use crate::database::tables;
use crate::state::AppState;
use crate::types::Operation;

use super::{revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

pub async fn save_hero(state: &AppState, form: &FormData) -> ActionResult {
    let title = form.text("title");
    if title.is_empty() {
        return Err(ActionError::validation("Title is required."));
    }

    let hero = HeroRow {
        id: tables::HERO_ID.to_string(),
        eyebrow: form.optional("eyebrow"),
        title,
        description: form.optional("description"),
        primary_cta_label: form.optional("primary_cta_label"),
        primary_cta_href: form.optional("primary_cta_href"),
        secondary_cta_label: form.optional("secondary_cta_label"),
        secondary_cta_href: form.optional("secondary_cta_href"),
        image_url: form.optional("image_url"),
        alt: form.optional("alt"),
    };

    state
        .store
        .upsert_hero(&hero)
        .await
        .map_err(|e| store_failure(Operation::Upsert, "hero", e, "Error saving hero content."))?;

    revalidate(
        &state.cache,
        Operation::Upsert,
        "hero",
        &["/".to_string(), "/admin/hero".to_string()],
    )
    .await;
    Ok(ActionState::success("Hero content saved successfully."))
}
