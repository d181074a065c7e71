//! Where uploaded images end up: the remote image host or local disk.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use transfer_core::upload::{ImageKind, LOCAL_URL_PREFIX};
use uuid::Uuid;

use crate::config::ImageHostConfig;

/// Where a stored file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Remote,
    Local,
}

/// Result of a successful upload, returned to the client as-is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub url: String,
    pub storage: StorageKind,
    pub size: usize,
    pub mime_type: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteUploadError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image host answered {0}")]
    Status(reqwest::StatusCode),

    #[error("image host response carried no url")]
    MissingUrl,
}

/// Fresh file name for an upload: a UUID with the extension of the detected
/// type. The client-supplied name is never used.
pub fn generated_file_name(kind: ImageKind) -> String {
    format!("{}.{}", Uuid::new_v4(), kind.extension())
}

/// Write `bytes` to `<root>/<folder>/<file_name>` and return its public URL.
pub async fn store_local(
    root: &Path,
    folder: &str,
    file_name: &str,
    bytes: &[u8],
) -> std::io::Result<String> {
    let dir = root.join(folder);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(file_name), bytes).await?;
    Ok(format!("{LOCAL_URL_PREFIX}{folder}/{file_name}"))
}

/// Send the file to the remote image host and return the URL it reports.
///
/// The host receives a multipart form with `key` and `file`; the URL is read
/// from `url`, `data.url` or `image.url` in the JSON answer.
pub async fn store_remote(
    http: &reqwest::Client,
    host: &ImageHostConfig,
    kind: ImageKind,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<String, RemoteUploadError> {
    let part = Part::bytes(bytes)
        .file_name(file_name.to_string())
        .mime_str(kind.mime())?;
    let form = Form::new()
        .text("key", host.api_key.clone())
        .part("file", part);

    let response = http.post(&host.upload_url).multipart(form).send().await?;
    if !response.status().is_success() {
        return Err(RemoteUploadError::Status(response.status()));
    }

    let body: serde_json::Value = response.json().await?;
    remote_url(&body).ok_or(RemoteUploadError::MissingUrl)
}

fn remote_url(body: &serde_json::Value) -> Option<String> {
    ["/url", "/data/url", "/image/url"]
        .iter()
        .find_map(|pointer| body.pointer(pointer).and_then(|v| v.as_str()))
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
        .map(str::to_string)
}
