use crate::database::models::{ServiceRecord, ServiceRow};
use crate::state::AppState;
use crate::types::Operation;

use super::{parse_decimal, revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

const ENTITY: &str = "service";

fn dependent_paths() -> Vec<String> {
    vec!["/services".to_string(), "/admin/services".to_string()]
}

fn record(id: String, title: String, description: String, form: &FormData) -> Result<ServiceRecord, ActionError> {
    let from_price_zar = match form.optional("from_price_zar") {
        Some(raw) => Some(
            parse_decimal(&raw).ok_or_else(|| ActionError::validation("From price must be a number."))?,
        ),
        None => None,
    };
    // Blank or non-integer order sorts first
    let sort_order = form.text("sort_order").parse::<i32>().unwrap_or(0);

    Ok(ServiceRecord {
        service: ServiceRow {
            id,
            title,
            description,
            from_price_zar,
            sort_order,
        },
        bullets: form.lines("bullets"),
    })
}

pub async fn create_service(state: &AppState, form: &FormData) -> ActionResult {
    let id = form.text("id");
    let title = form.text("title");
    let description = form.text("description");
    if id.is_empty() || title.is_empty() || description.is_empty() {
        return Err(ActionError::validation("Please fill id, title and description."));
    }

    let record = record(id, title, description, form)?;
    state.store.insert_service(&record).await.map_err(|e| {
        store_failure(
            Operation::Create,
            ENTITY,
            e,
            "Error creating service (maybe id already exists).",
        )
    })?;

    revalidate(&state.cache, Operation::Create, ENTITY, &dependent_paths()).await;
    Ok(ActionState::success("Service created successfully."))
}

pub async fn update_service(state: &AppState, form: &FormData) -> ActionResult {
    let id = form.text("id");
    if id.is_empty() {
        return Err(ActionError::validation("Missing service id."));
    }
    let title = form.text("title");
    let description = form.text("description");
    if title.is_empty() || description.is_empty() {
        return Err(ActionError::validation("Please fill title and description."));
    }

    let record = record(id, title, description, form)?;
    state
        .store
        .update_service(&record)
        .await
        .map_err(|e| store_failure(Operation::Update, ENTITY, e, "Error updating service."))?;

    revalidate(&state.cache, Operation::Update, ENTITY, &dependent_paths()).await;
    Ok(ActionState::success("Service updated."))
}

pub async fn delete_service(state: &AppState, id: &str) -> ActionResult {
    let id = id.trim();
    if id.is_empty() {
        return Err(ActionError::validation("Missing service id."));
    }

    state
        .store
        .delete_service(id)
        .await
        .map_err(|e| store_failure(Operation::Delete, ENTITY, e, "Error deleting service."))?;

    revalidate(&state.cache, Operation::Delete, ENTITY, &dependent_paths()).await;
    Ok(ActionState::success("Service deleted."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::mutations::testing::state_with;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn washing() -> FormData {
        FormData::from_pairs([
            ("id", "washing"),
            ("title", "Rug washing"),
            ("description", "Hand wash for wool and silk rugs."),
            ("from_price_zar", "450"),
            ("sort_order", "2"),
            ("bullets", "Dust removal\nHand wash\n\nDrying"),
        ])
    }

    #[tokio::test]
    async fn creates_service_with_bullets() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        let result = create_service(&state, &washing()).await.unwrap();
        assert_eq!(result.message, "Service created successfully.");

        let tables = store.snapshot().await;
        assert_eq!(tables.services[0].from_price_zar, Some(Decimal::new(450, 0)));
        assert_eq!(tables.services[0].sort_order, 2);
        let bullets: Vec<_> = tables.service_bullets.iter().map(|b| b.bullet.as_str()).collect();
        assert_eq!(bullets, vec!["Dust removal", "Hand wash", "Drying"]);
    }

    #[tokio::test]
    async fn optional_numbers() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());
        let form = FormData::from_pairs([
            ("id", "repair"),
            ("title", "Repairs"),
            ("description", "Fringe and edge repairs."),
            ("sort_order", "first"),
        ]);
        create_service(&state, &form).await.unwrap();

        let service = store.snapshot().await.services[0].clone();
        assert_eq!(service.from_price_zar, None);
        assert_eq!(service.sort_order, 0);

        let bad = FormData::from_pairs([
            ("id", "x"),
            ("title", "X"),
            ("description", "Y"),
            ("from_price_zar", "cheap"),
        ]);
        assert_eq!(
            create_service(&state, &bad).await.unwrap_err(),
            ActionError::validation("From price must be a number.")
        );
    }

    #[tokio::test]
    async fn from_price_must_fit_two_decimals() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        for price in ["1_000", "450.125", "0.0000000000000000000000000000001", "1e10"] {
            let mut form = washing();
            form.set("from_price_zar", price);
            assert_eq!(
                create_service(&state, &form).await.unwrap_err(),
                ActionError::validation("From price must be a number."),
                "accepted {price}"
            );
        }
        assert!(store.snapshot().await.services.is_empty());
    }

    #[tokio::test]
    async fn validation_messages() {
        let state = state_with(Arc::new(MemoryStore::new()));
        let form = FormData::from_pairs([("title", "Only title")]);
        assert_eq!(
            create_service(&state, &form).await.unwrap_err().message(),
            "Please fill id, title and description."
        );
        assert_eq!(
            update_service(&state, &form).await.unwrap_err().message(),
            "Missing service id."
        );
        let no_description = FormData::from_pairs([("id", "washing"), ("title", "T")]);
        assert_eq!(
            update_service(&state, &no_description).await.unwrap_err().message(),
            "Please fill title and description."
        );
    }

    #[tokio::test]
    async fn update_replaces_bullets_and_delete_clears_them() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());
        create_service(&state, &washing()).await.unwrap();

        let form = FormData::from_pairs([
            ("id", "washing"),
            ("title", "Deep washing"),
            ("description", "Full immersion wash."),
            ("bullets", "Immersion"),
        ]);
        assert_eq!(update_service(&state, &form).await.unwrap().message, "Service updated.");
        assert_eq!(store.snapshot().await.service_bullets.len(), 1);

        assert_eq!(delete_service(&state, "washing").await.unwrap().message, "Service deleted.");
        let tables = store.snapshot().await;
        assert!(tables.services.is_empty());
        assert!(tables.service_bullets.is_empty());
    }

    #[tokio::test]
    async fn duplicate_service_id() {
        let state = state_with(Arc::new(MemoryStore::new()));
        create_service(&state, &washing()).await.unwrap();
        let err = create_service(&state, &washing()).await.unwrap_err();
        assert_eq!(err.message(), "Error creating service (maybe id already exists).");
    }
}
