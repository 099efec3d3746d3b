//! Raw key-value form input, from urlencoded or multipart bodies.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::storage::UploadedFile;

#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl FormData {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            form.insert(key.into(), value.into());
        }
        form
    }

    pub fn from_urlencoded(body: &[u8]) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    /// First value wins, like `FormData.get`
    pub fn insert(&mut self, key: String, value: String) {
        self.fields.entry(key).or_insert(value);
    }

    /// Overwrite a field, e.g. with the id taken from the route path
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(name.into(), file);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Trimmed value; empty when the field is absent
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or blank
    pub fn optional(&self, name: &str) -> Option<String> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    /// Comma separated entries, trimmed, blanks dropped
    pub fn list(&self, name: &str) -> Vec<String> {
        split_entries(&self.text(name), &[','])
    }

    /// One entry per line
    pub fn lines(&self, name: &str) -> Vec<String> {
        split_entries(&self.text(name), &['\n'])
    }

    /// Entries separated by commas or newlines
    pub fn list_or_lines(&self, name: &str) -> Vec<String> {
        split_entries(&self.text(name), &[',', '\n'])
    }

    /// Uploaded file, ignoring the empty part browsers send when nothing was picked
    pub fn file(&self, name: &str) -> Option<UploadedFile> {
        self.files.get(name).filter(|f| !f.is_empty()).cloned()
    }
}

fn split_entries(raw: &str, separators: &[char]) -> Vec<String> {
    raw.split(|c| separators.contains(&c))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if !is_multipart {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid form body: {}", e)))?;
            return Ok(Self::from_urlencoded(&body));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?;

        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {}", e)))?;

            match file_name {
                Some(file_name) => {
                    form.files.entry(name).or_insert(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                None => form.insert(name, String::from_utf8_lossy(&bytes).into_owned()),
            }
        }

        Ok(form)
    }
}
