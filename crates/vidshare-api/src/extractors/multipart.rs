//! Multipart form collection for uploads
//!
//! File parts are buffered in memory (the router's body limit bounds them)
//! and text parts are kept by name.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use vidshare_common::AppError;
use vidshare_service::MediaUpload;

use crate::response::ApiError;

/// Parts of a submitted form
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, MediaUpload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Drain `multipart`; `limit_mb` is reported when the body is too large.
    pub async fn read(mut multipart: Multipart, limit_mb: u32) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, limit_mb))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() || field.content_type().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .or_else(|| {
                        file_name
                            .as_deref()
                            .and_then(|n| mime_guess::from_path(n).first())
                            .map(|m| m.essence_str().to_string())
                    })
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, limit_mb))?
                    .to_vec();

                form.files
                    .insert(name, MediaUpload::new(file_name, content_type, data));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, limit_mb))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    pub fn take_file(&mut self, name: &str) -> Option<MediaUpload> {
        self.files.remove(name)
    }

    pub fn require_file(&mut self, name: &str) -> Result<MediaUpload, ApiError> {
        self.take_file(name)
            .ok_or_else(|| ApiError::invalid_body(format!("Missing file part '{name}'")))
    }

    /// Text field, with empty values treated as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn multipart_error(err: MultipartError, limit_mb: u32) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit_mb }.into()
    } else {
        ApiError::invalid_body(err.body_text())
    }
}
