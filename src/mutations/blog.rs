use chrono::{DateTime, NaiveDate, Utc};

use crate::content::slugify;
use crate::database::models::{BlogPostRecord, BlogPostRow};
use crate::database::StoreError;
use crate::state::AppState;
use crate::types::Operation;

use super::{revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

const ENTITY: &str = "blog post";
const SLUG_TAKEN: &str = "Slug already exists. Please change the slug or use a different title.";

fn dependent_paths(id: &str) -> Vec<String> {
    vec![
        "/blog".to_string(),
        format!("/blog/{id}"),
        "/admin/blog".to_string(),
    ]
}

/// `YYYY-MM-DD` at midnight UTC; anything else means now
fn published_at(raw: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_else(Utc::now)
}

fn unique_tags(form: &FormData) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in form.list("tags") {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Create a post when `id` is blank, otherwise update it; tags are relinked either way
pub async fn save_blog_post(state: &AppState, form: &FormData) -> ActionResult {
    let title = form.text("title");
    if title.is_empty() {
        return Err(ActionError::validation("Title is required."));
    }

    let existing_id = form.optional("id");
    let id = existing_id.clone().unwrap_or_else(|| {
        let slug = slugify(&title);
        if slug.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            slug
        }
    });

    let record = BlogPostRecord {
        post: BlogPostRow {
            id: id.clone(),
            slug: form.optional("slug").unwrap_or_else(|| slugify(&title)),
            title,
            excerpt: form.optional("excerpt"),
            content: form.text("content"),
            published_at: Some(published_at(&form.text("published_at"))),
        },
        tags: unique_tags(form),
    };

    let (operation, result, failure, success) = match existing_id {
        Some(_) => (
            Operation::Update,
            state.store.update_blog_post(&record).await,
            "Error updating post.",
            "Post updated successfully.",
        ),
        None => (
            Operation::Create,
            state.store.insert_blog_post(&record).await,
            "Error creating post.",
            "Post created successfully.",
        ),
    };

    if let Err(err) = result {
        // A fresh post can only collide on its slug
        let message = match (&operation, &err) {
            (Operation::Create, StoreError::Conflict(_)) => SLUG_TAKEN,
            _ => failure,
        };
        return Err(store_failure(operation, ENTITY, err, message));
    }

    revalidate(&state.cache, operation, ENTITY, &dependent_paths(&id)).await;
    Ok(ActionState::success(success).with_post_id(id))
}

pub async fn delete_blog_post(state: &AppState, id: &str) -> ActionResult {
    let id = id.trim();
    if id.is_empty() {
        return Err(ActionError::validation("Missing post id."));
    }

    state
        .store
        .delete_blog_post(id)
        .await
        .map_err(|e| store_failure(Operation::Delete, ENTITY, e, "Error deleting post."))?;

    revalidate(&state.cache, Operation::Delete, ENTITY, &dependent_paths(id)).await;
    Ok(ActionState::success("Post deleted successfully."))
}
