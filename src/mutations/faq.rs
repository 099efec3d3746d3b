use crate::state::AppState;
use crate::types::Operation;

use super::{revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

const ENTITY: &str = "faq";

fn dependent_paths() -> Vec<String> {
    vec!["/".to_string(), "/admin/faq".to_string()]
}

pub async fn create_faq(state: &AppState, form: &FormData) -> ActionResult {
    let question = form.text("question");
    let answer = form.text("answer");
    if question.is_empty() || answer.is_empty() {
        return Err(ActionError::validation("Question and answer are required."));
    }
    let sort_order = form.text("sort_order").parse::<i32>().unwrap_or(0);

    state
        .store
        .insert_faq(&question, &answer, sort_order)
        .await
        .map_err(|e| store_failure(Operation::Create, ENTITY, e, "Error creating FAQ. Please try again."))?;

    revalidate(&state.cache, Operation::Create, ENTITY, &dependent_paths()).await;
    Ok(ActionState::success("FAQ created successfully."))
}

/// Update or delete an entry, chosen by the `intent` field (`update` when absent)
pub async fn update_faq(state: &AppState, form: &FormData) -> ActionResult {
    let id = form
        .text("id")
        .parse::<i64>()
        .map_err(|_| ActionError::validation("Missing FAQ id."))?;

    if form.text("intent") == "delete" {
        state
            .store
            .delete_faq(id)
            .await
            .map_err(|e| store_failure(Operation::Delete, ENTITY, e, "Error deleting FAQ. Please try again."))?;

        revalidate(&state.cache, Operation::Delete, ENTITY, &dependent_paths()).await;
        return Ok(ActionState::success("FAQ deleted successfully."));
    }

    state
        .store
        .update_faq(id, &form.text("question"), &form.text("answer"))
        .await
        .map_err(|e| store_failure(Operation::Update, ENTITY, e, "Error saving FAQ. Please try again."))?;

    revalidate(&state.cache, Operation::Update, ENTITY, &dependent_paths()).await;
    Ok(ActionState::success("FAQ updated successfully."))
}
