//! Loading the résumé that gets indexed.
//!
//! Plain-text files are read as-is. Files with a `.pdf` extension go through
//! `pdf-extract` on the blocking pool. Without a path the built-in fallback
//! profile is used.

use std::path::Path;

use pathfinder_rag::Document;
use tracing::{debug, warn};

use crate::error::ResumeError;

/// Load the résumé at `path`, or the fallback profile when there is none.
pub async fn load_document(path: Option<&Path>) -> Result<Document, ResumeError> {
    let Some(path) = path else {
        warn!("no résumé given, indexing the fallback profile");
        return Ok(Document::fallback());
    };

    let text = if is_pdf(path) { read_pdf(path).await? } else { read_text(path).await? };
    debug!(path = %path.display(), chars = text.chars().count(), "résumé loaded");
    Ok(Document::from_text(text).with_source(path.display().to_string()))
}

fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

async fn read_text(path: &Path) -> Result<String, ResumeError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ResumeError::Read { path: path.to_path_buf(), source })
}

async fn read_pdf(path: &Path) -> Result<String, ResumeError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ResumeError::Read { path: path.to_path_buf(), source })?;

    let pdf_error = |message: String| ResumeError::Pdf { path: path.to_path_buf(), message };
    let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| pdf_error(format!("extraction task failed: {e}")))?
        .map_err(pdf_error)?;

    if text.trim().is_empty() {
        return Err(pdf_error("no extractable text (scanned image?)".to_string()));
    }
    Ok(text)
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}
