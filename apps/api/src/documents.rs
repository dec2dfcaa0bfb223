//! Document boundary — turns uploaded files into the plain text the analysis
//! engine accepts. PDF and plain-text formats only.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";
const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

/// Picks a decoder from the file extension, falling back to the declared
/// content type. `None` means the format is not supported.
pub fn detect_format(file_name: Option<&str>, content_type: Option<&str>) -> Option<DocumentFormat> {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => return Some(DocumentFormat::Pdf),
        Some("txt" | "md" | "text" | "markdown") => return Some(DocumentFormat::PlainText),
        Some(_) => return None,
        None => {}
    }

    let content_type = content_type?.to_ascii_lowercase();
    if content_type == "application/pdf" {
        Some(DocumentFormat::Pdf)
    } else if content_type.starts_with("text/") {
        Some(DocumentFormat::PlainText)
    } else {
        None
    }
}

/// Decodes one uploaded file. CPU-bound for PDFs; call from a blocking task.
pub fn decode_document(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let label = file_name.unwrap_or("document");
    let format = detect_format(file_name, content_type).ok_or_else(|| {
        AppError::UnprocessableEntity(format!(
            "{label}: unsupported format; upload a PDF or plain-text file"
        ))
    })?;

    let text = match format {
        DocumentFormat::Pdf => decode_pdf(label, bytes)?,
        DocumentFormat::PlainText => std::str::from_utf8(bytes)
            .map_err(|_| AppError::UnprocessableEntity(format!("{label}: text is not valid UTF-8")))?
            .trim_start_matches(UTF8_BOM)
            .to_string(),
    };

    debug!(?format, chars = text.chars().count(), "Decoded document");
    Ok(text)
}

fn decode_pdf(label: &str, bytes: &[u8]) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::UnprocessableEntity(format!("{label}: not a PDF file")));
    }
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("{label}: could not read PDF: {e}")))?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "{label}: PDF has no extractable text (scanned documents are not supported)"
        )));
    }
    Ok(text)
}

/// Runs `decode_document` on the blocking pool. A panic inside the PDF parser
/// surfaces as `UnprocessableEntity` instead of taking the worker down.
pub async fn decode_upload(
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
) -> Result<String, AppError> {
    let label = file_name.clone().unwrap_or_else(|| "document".to_string());
    tokio::task::spawn_blocking(move || {
        decode_document(file_name.as_deref(), content_type.as_deref(), &bytes)
    })
    .await
    .map_err(|e| AppError::UnprocessableEntity(format!("{label}: could not be decoded: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_by_extension() {
        assert_eq!(detect_format(Some("cv.PDF"), None), Some(DocumentFormat::Pdf));
        assert_eq!(detect_format(Some("notes.md"), Some("application/octet-stream")), Some(DocumentFormat::PlainText));
        assert_eq!(detect_format(Some("cv.docx"), Some("text/plain")), None);
    }

    #[test]
    fn test_detect_format_by_content_type() {
        assert_eq!(detect_format(None, Some("application/pdf")), Some(DocumentFormat::Pdf));
        assert_eq!(detect_format(Some("upload"), Some("text/plain; charset=utf-8")), Some(DocumentFormat::PlainText));
        assert_eq!(detect_format(None, None), None);
    }

    #[test]
    fn test_plain_text_strips_bom() {
        let text = decode_document(Some("cv.txt"), None, "\u{feff}Staff Nurse".as_bytes()).unwrap();
        assert_eq!(text, "Staff Nurse");
    }

    #[test]
    fn test_word_document_is_unprocessable() {
        let err = decode_document(Some("cv.docx"), None, b"PK\x03\x04").unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_invalid_utf8_is_unprocessable() {
        let err = decode_document(Some("cv.txt"), None, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_pdf_without_magic_is_rejected() {
        let err = decode_document(Some("cv.pdf"), None, b"plain text pretending").unwrap_err();
        match err {
            AppError::UnprocessableEntity(message) => assert!(message.contains("not a PDF"), "{message}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_decode_upload_runs_plain_text() {
        let text = decode_upload(
            Some("posting.txt".to_string()),
            Some("text/plain".to_string()),
            Bytes::from_static(b"Person Specification"),
        )
        .await
        .unwrap();
        assert_eq!(text, "Person Specification");
    }
}
