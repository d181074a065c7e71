//! Handler for `POST /upload` (admin image uploads).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use transfer_core::error::CoreError;
use transfer_core::upload::{detect_image, validate_folder};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{generated_file_name, store_local, store_remote, StorageKind, StoredFile};

/// Parsed multipart form of an upload.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    folder: Option<String>,
    use_remote: bool,
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "on" | "yes")
}

async fn read_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(bytes.to_vec());
            }
            Some("folder") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.folder = Some(text.trim().to_string());
            }
            Some("usePostImage") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.use_remote = parse_flag(&text);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/upload
///
/// Multipart fields: `file`, `folder` (`blog`, `gallery` or `reviews`) and
/// an optional `usePostImage` flag. The image type is sniffed from the file
/// content and the stored name is a fresh UUID. With `usePostImage` the file
/// goes to the remote image host; if that fails for any reason it is kept on
/// local disk instead.
pub async fn upload_image(
    admin: AdminSession,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<StoredFile>>)> {
    let form = read_form(multipart).await?;
    let upload = &state.config.upload;

    let folder = form
        .folder
        .filter(|f| !f.is_empty())
        .ok_or_else(|| CoreError::field("folder", "is required"))?;
    validate_folder(&folder)?;

    let bytes = form
        .file
        .filter(|b| !b.is_empty())
        .ok_or_else(|| CoreError::field("file", "is required"))?;
    if bytes.len() > upload.max_bytes {
        return Err(CoreError::field(
            "file",
            format!("must be at most {} bytes", upload.max_bytes),
        )
        .into());
    }
    let kind = detect_image(&bytes).ok_or_else(|| {
        CoreError::field("file", "unsupported file type, expected JPEG, PNG, GIF or WebP")
    })?;

    let file_name = generated_file_name(kind);
    let size = bytes.len();

    if form.use_remote {
        match &upload.image_host {
            Some(host) => {
                match store_remote(&state.http, host, kind, &file_name, bytes.clone()).await {
                    Ok(url) => {
                        tracing::info!(admin = %admin.username, %folder, %url, size, "Image uploaded to remote host");
                        let stored = StoredFile {
                            url,
                            storage: StorageKind::Remote,
                            size,
                            mime_type: kind.mime(),
                        };
                        return Ok((StatusCode::CREATED, Json(DataResponse { data: stored })));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Remote image upload failed, storing locally");
                    }
                }
            }
            None => {
                tracing::warn!("Remote upload requested but no image host is configured, storing locally");
            }
        }
    }

    let url = store_local(&upload.dir, &folder, &file_name, &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(admin = %admin.username, %folder, %url, size, "Image stored locally");

    let stored = StoredFile {
        url,
        storage: StorageKind::Local,
        size,
        mime_type: kind.mime(),
    };
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
