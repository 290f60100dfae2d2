//! PDF text extraction for uploaded resumes.
//!
//! Runs `pdf-extract` on the in-memory upload; the extraction is CPU
//! bound, so it moves off the async runtime. Failures surface as a single
//! flat extraction error with no partial result.

use crate::errors::AppError;

/// Extracts plain text from PDF bytes. Scanned PDFs with no text layer
/// are rejected rather than returning an empty resume.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task panicked: {e}")))?
        .map_err(|e| AppError::Extraction(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "no text content found in PDF".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_fail_as_extraction_error() {
        let result = extract_pdf_text(b"not a pdf".to_vec()).await;
        assert!(matches!(result, Err(AppError::Extraction(_))));
    }
}
