use crate::cache::LAYOUT;
use crate::database::models::{AboutRecord, ContactRow, OrgRow, SocialLinkRow};
use crate::database::tables;
use crate::state::AppState;
use crate::types::Operation;

use super::{revalidate, store_failure, ActionError, ActionResult, ActionState, FormData};

const ENTITY: &str = "about";
const MANAGED_PLATFORMS: [&str; 2] = ["instagram", "facebook"];

fn required(form: &FormData, name: &str, message: &str) -> Result<String, ActionError> {
    let value = form.text(name);
    if value.is_empty() {
        return Err(ActionError::validation(message));
    }
    Ok(value)
}

/// Save brand, contact and the instagram/facebook links in one write
pub async fn save_about(state: &AppState, form: &FormData) -> ActionResult {
    let brand_name = required(form, "brandName", "Brand name is required.")?;
    let phone = required(form, "phone", "Phone number is required.")?;
    let email = required(form, "email", "Email is required.")?;
    let address = required(form, "address", "Address is required.")?;

    let site = &state.config.site;
    let org_id = tables::DEFAULT_ID.to_string();

    let social_links = MANAGED_PLATFORMS
        .iter()
        .zip(["instagramUrl", "facebookUrl"])
        .filter_map(|(platform, field)| {
            form.optional(field).map(|url| SocialLinkRow {
                org_id: org_id.clone(),
                platform: platform.to_string(),
                url,
            })
        })
        .collect();

    let record = AboutRecord {
        org: OrgRow {
            id: org_id.clone(),
            brand_name,
            domain: form.optional("domain").unwrap_or_else(|| site.default_domain.clone()),
        },
        contact: ContactRow {
            id: org_id,
            phone,
            whatsapp: form.optional("whatsapp"),
            email,
            hours: form.optional("hours"),
            address,
            map_query: form
                .optional("mapQuery")
                .unwrap_or_else(|| site.default_map_query.clone()),
            map_embed_src: form
                .optional("mapEmbedSrc")
                .unwrap_or_else(|| site.default_map_embed_src.clone()),
        },
        managed_platforms: MANAGED_PLATFORMS.iter().map(|p| p.to_string()).collect(),
        social_links,
    };

    state
        .store
        .save_about(&record)
        .await
        .map_err(|e| store_failure(Operation::Upsert, ENTITY, e, "Error saving about & contact info."))?;

    revalidate(
        &state.cache,
        Operation::Upsert,
        ENTITY,
        &["/about".to_string(), "/".to_string(), LAYOUT.to_string()],
    )
    .await;
    Ok(ActionState::success("About, contact & social info updated."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, MemoryTables};
    use crate::mutations::testing::state_with;
    use serde_json::json;
    use std::sync::Arc;

    fn about_form(phone: &str) -> FormData {
        FormData::from_pairs([
            ("brandName", "IVA"),
            ("phone", phone),
            ("email", "hello@iva.co.za"),
            ("address", "12 Main St, Klerksdorp"),
            ("instagramUrl", "https://instagram.com/iva"),
            ("facebookUrl", ""),
        ])
    }

    #[tokio::test]
    async fn empty_phone_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone());

        let err = save_about(&state, &about_form("")).await.unwrap_err();
        assert_eq!(err, ActionError::validation("Phone number is required."));

        let tables = store.snapshot().await;
        assert!(tables.org.is_none());
        assert!(tables.contact.is_none());
        assert!(tables.social_links.is_empty());
    }

    #[tokio::test]
    async fn fills_defaults_and_replaces_managed_links() {
        let store = Arc::new(MemoryStore::from_tables(MemoryTables {
            social_links: vec![
                SocialLinkRow {
                    org_id: "default".into(),
                    platform: "facebook".into(),
                    url: "https://facebook.com/old".into(),
                },
                SocialLinkRow {
                    org_id: "default".into(),
                    platform: "tiktok".into(),
                    url: "https://tiktok.com/@iva".into(),
                },
            ],
            ..Default::default()
        }));
        let state = state_with(store.clone());
        state.cache.put(LAYOUT, json!({})).await;

        let result = save_about(&state, &about_form("018 000 0000")).await.unwrap();
        assert_eq!(result.message, "About, contact & social info updated.");

        let tables = store.snapshot().await;
        let org = tables.org.unwrap();
        assert_eq!(org.domain, state.config.site.default_domain);
        let contact = tables.contact.unwrap();
        assert_eq!(contact.map_query, "IVA, Klerksdorp");
        assert_eq!(contact.whatsapp, None);

        let mut platforms: Vec<_> = tables.social_links.iter().map(|l| l.platform.as_str()).collect();
        platforms.sort();
        assert_eq!(platforms, vec!["instagram", "tiktok"]);
        assert!(state.cache.get(LAYOUT).await.is_none());
    }

    #[tokio::test]
    async fn checks_required_fields_in_order() {
        let state = state_with(Arc::new(MemoryStore::new()));
        let err = save_about(&state, &FormData::default()).await.unwrap_err();
        assert_eq!(err.message(), "Brand name is required.");

        let no_email = FormData::from_pairs([("brandName", "IVA"), ("phone", "1")]);
        assert_eq!(save_about(&state, &no_email).await.unwrap_err().message(), "Email is required.");
    }
}
