use rust_decimal::Decimal;

use crate::database::models::{GalleryItemRecord, GalleryItemRow};
use crate::state::AppState;
use crate::storage::upload_image;
use crate::types::Operation;

use super::{parse_decimal, revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

const ENTITY: &str = "gallery item";

fn dependent_paths(id: &str) -> Vec<String> {
    vec![
        "/".to_string(),
        "/gallery".to_string(),
        format!("/gallery/{id}"),
        "/admin/gallery".to_string(),
    ]
}

/// The fields shared by create and update, already validated
struct ItemFields {
    title: String,
    category: String,
    size: String,
    material: String,
    price: Decimal,
}

fn required_fields(form: &FormData, missing: &str) -> Result<ItemFields, ActionError> {
    let title = form.text("title");
    let category = form.text("category");
    let size = form.text("size");
    let material = form.text("material");
    let price = form.text("price_zar");

    if [&title, &category, &size, &material, &price]
        .iter()
        .any(|value| value.is_empty())
    {
        return Err(ActionError::validation(missing));
    }

    let price = parse_decimal(&price).ok_or_else(|| ActionError::validation("Price must be numeric."))?;
    Ok(ItemFields {
        title,
        category,
        size,
        material,
        price,
    })
}

/// Uploaded file first, then the `image_url` field, then `fallback`
async fn resolve_image(
    state: &AppState,
    form: &FormData,
    id: &str,
    fallback: String,
) -> Result<String, ActionError> {
    if let Some(file) = form.file("image") {
        let uploaded = match &state.storage {
            Some(storage) => upload_image(storage.as_ref(), file, id).await,
            None => {
                tracing::error!("Upload error: storage is not configured");
                None
            }
        };
        return uploaded.ok_or_else(|| ActionError::Upload("Image upload failed.".to_string()));
    }
    Ok(form.optional("image_url").unwrap_or(fallback))
}

fn record(id: String, fields: ItemFields, image_url: String, form: &FormData) -> GalleryItemRecord {
    GalleryItemRecord {
        item: GalleryItemRow {
            id,
            title: fields.title,
            category: fields.category,
            size: fields.size,
            dimensions: form.optional("dimensions"),
            material: fields.material,
            origin: form.optional("origin"),
            price_zar: fields.price,
            description: form.text("description"),
            image_url,
        },
        colors: form.list("colors"),
        badges: form.list("badges"),
        detail_images: form.has("gallery").then(|| form.list_or_lines("gallery")),
    }
}

pub async fn create_gallery_item(state: &AppState, form: &FormData) -> ActionResult {
    let id = form.text("id");
    if id.is_empty() {
        return Err(ActionError::validation("Please fill required fields."));
    }
    let fields = required_fields(form, "Please fill required fields.")?;
    let image_url = resolve_image(state, form, &id, state.config.site.default_image.clone()).await?;

    let record = record(id, fields, image_url, form);
    state
        .store
        .insert_gallery_item(&record)
        .await
        .map_err(|e| store_failure(Operation::Create, ENTITY, e, "Error creating item. ID may already exist."))?;

    revalidate(&state.cache, Operation::Create, ENTITY, &dependent_paths(&record.item.id)).await;
    Ok(ActionState::success("Gallery item created successfully."))
}

pub async fn update_gallery_item(state: &AppState, form: &FormData) -> ActionResult {
    let id = form.text("id");
    if id.is_empty() {
        return Err(ActionError::validation("Missing item id."));
    }
    let fields = required_fields(form, "Required fields missing.")?;
    let fallback = form
        .optional("existing_image_url")
        .unwrap_or_else(|| state.config.site.default_image.clone());
    let image_url = resolve_image(state, form, &id, fallback).await?;

    let record = record(id, fields, image_url, form);
    state
        .store
        .update_gallery_item(&record)
        .await
        .map_err(|e| store_failure(Operation::Update, ENTITY, e, "Error updating item."))?;

    revalidate(&state.cache, Operation::Update, ENTITY, &dependent_paths(&record.item.id)).await;
    Ok(ActionState::success("Gallery item updated."))
}

pub async fn delete_gallery_item(state: &AppState, id: &str) -> ActionResult {
    let id = id.trim();
    if id.is_empty() {
        return Err(ActionError::validation("Missing item id."));
    }

    state
        .store
        .delete_gallery_item(id)
        .await
        .map_err(|e| store_failure(Operation::Delete, ENTITY, e, "Error deleting item."))?;

    revalidate(&state.cache, Operation::Delete, ENTITY, &dependent_paths(id)).await;
    Ok(ActionState::success("Gallery item deleted."))
}
