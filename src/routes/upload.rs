use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::pipeline::driver;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload))
}

#[derive(Serialize, Deserialize)]
struct UploadResponse {
    upload_id: String,
    success: bool,
    files: usize,
    persisted: usize,
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut sports: Vec<String> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                file_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::BadRequest(format!("Failed to read file bytes: {}", e))
                        })?
                        .to_vec(),
                );
            }
            "sport" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read sport selection: {}", e))
                })?;
                sports.push(value);
            }
            _ => {}
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename =
        filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    if sports.is_empty() {
        sports = state.config.persist_sports.clone();
    }

    let upload_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("upload", upload_id = %upload_id);
    span.in_scope(|| tracing::info!("Input file: {} ({} bytes)", filename, bytes.len()));

    let worker_span = span.clone();
    let report = tokio::task::spawn_blocking(move || {
        let _guard = worker_span.enter();
        driver::ingest(
            &state.config,
            state.decoder.as_ref(),
            state.destination.as_ref(),
            &sports,
            &filename,
            bytes,
        )
    })
    .await
    .map_err(|e| AppError::Internal(format!("Upload worker failed: {}", e)))??;

    span.in_scope(|| {
        tracing::info!(
            "Upload finished: {} files, {} persisted, {} failed",
            report.files,
            report.persisted,
            report.failed
        )
    });

    Ok(Json(UploadResponse {
        upload_id,
        success: report.success(),
        files: report.files,
        persisted: report.persisted,
    }))
}
