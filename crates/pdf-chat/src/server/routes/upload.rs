//! PDF upload endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// Multipart field carrying the PDF
const FILE_FIELD: &str = "file";

/// POST /upload - Replace the active document with an uploaded PDF
pub async fn upload_pdf(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| Error::invalid_input(e.body_text()))?;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        let is_file = field.name() == Some(FILE_FIELD) || field.file_name().is_some();
        if !is_file {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| Error::invalid_input("No file uploaded"))?;
    tracing::info!("Received file: {} ({} bytes)", filename, data.len());

    match state.ingest_document(&filename, &data).await {
        Ok(_) => Ok(Json(UploadResponse::processed())),
        Err(e) => {
            let e = e.classified();
            tracing::error!("Error processing PDF '{}': {}", filename, e);
            Err(e)
        }
    }
}
