//! Forwarding stored objects to the WhatsApp Graph media endpoint.

use serde::{Deserialize, Serialize};

use super::{bridge, StorageError};
use crate::config;

/// Handle returned by the messaging service for an uploaded media object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub id: String,
    pub mime_type: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

/// Fetch the object for `key` from storage and upload it as media to the
/// messaging service. Returns the service's media handle.
pub async fn upload_media(key: &str) -> Result<MediaDescriptor, StorageError> {
    let cfg = &config::config().messaging;
    if cfg.access_token.is_empty() || cfg.phone_number_id.is_empty() {
        return Err(StorageError::Upload(
            "messaging credentials not configured".to_string(),
        ));
    }

    let bytes = bridge().fetch_object(key).await?;

    let mime = mime_for_key(key);
    let file_name = key.rsplit('/').next().unwrap_or(key).to_string();

    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| StorageError::Upload(e.to_string()))?;
    let form = reqwest::multipart::Form::new()
        .text("messaging_product", "whatsapp")
        .text("type", mime)
        .part("file", part);

    let url = format!(
        "{}/{}/media",
        cfg.api_base.trim_end_matches('/'),
        cfg.phone_number_id
    );

    let response = bridge()
        .http()
        .post(url)
        .bearer_auth(&cfg.access_token)
        .multipart(form)
        .send()
        .await
        .map_err(|e| StorageError::Upload(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StorageError::UploadStatus(status.as_u16(), body));
    }

    let uploaded: UploadResponse = response
        .json()
        .await
        .map_err(|e| StorageError::Upload(e.to_string()))?;

    Ok(MediaDescriptor {
        id: uploaded.id,
        mime_type: mime.to_string(),
    })
}

/// Best-effort MIME type from the stored key's extension. The messaging
/// service rejects uploads without a type, so unknown extensions fall back
/// to a generic binary type.
fn mime_for_key(key: &str) -> &'static str {
    let extension = key.rsplit('.').next().unwrap_or_default().to_lowercase();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "3gp" => "video/3gpp",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
