//! Attachment loading and encoding.
//!
//! Receipts and invoices are attached as base64 text inside the JSON body,
//! alongside the file's name and declared MIME type.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use tokio::fs;

use asesor_core::error::{AsesorError, Result};
use asesor_core::request::{AttachmentSource, FilePayload};

/// Guesses a MIME type from the file extension.
///
/// Covers the document kinds users attach to a financial assistant;
/// anything else falls back to `application/octet-stream`.
fn guess_mime_type(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Builds an [`AttachmentSource`] from a path, mirroring the file's name
/// and guessed MIME type.
pub fn attachment_from_path(path: impl Into<PathBuf>) -> Result<AttachmentSource> {
    let path = path.into();
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AsesorError::attachment_read(format!(
                "path has no usable file name: {}",
                path.display()
            ))
        })?
        .to_string();
    let mime_type = guess_mime_type(&path);

    Ok(AttachmentSource::new(path, name, mime_type))
}

/// Reads the attachment's bytes and encodes them for the wire.
///
/// # Errors
///
/// Returns [`AsesorError::AttachmentRead`] when the file cannot be read;
/// the caller must settle the operation without any network call.
pub async fn load_payload(source: &AttachmentSource) -> Result<FilePayload> {
    let bytes = fs::read(&source.path).await.map_err(|err| {
        AsesorError::attachment_read(format!("{}: {}", source.path.display(), err))
    })?;

    tracing::debug!(
        "[Attachment] Encoded {} ({} bytes, {})",
        source.name,
        bytes.len(),
        source.mime_type
    );

    Ok(FilePayload {
        name: source.name.clone(),
        mime_type: source.mime_type.clone(),
        data: BASE64_STANDARD.encode(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("recibo.PNG")), "image/png");
        assert_eq!(guess_mime_type(Path::new("factura.pdf")), "application/pdf");
        assert_eq!(
            guess_mime_type(Path::new("extracto.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            guess_mime_type(Path::new("sin_extension")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_attachment_from_path_mirrors_metadata() {
        let source = attachment_from_path("/tmp/facturas/recibo.jpeg").unwrap();
        assert_eq!(source.name, "recibo.jpeg");
        assert_eq!(source.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_load_payload_encodes_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recibo.png");
        let bytes = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a];
        std::fs::write(&path, bytes).unwrap();

        let source = attachment_from_path(&path).unwrap();
        let payload = load_payload(&source).await.unwrap();

        assert_eq!(payload.name, "recibo.png");
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(payload.data, BASE64_STANDARD.encode(bytes));
    }

    #[tokio::test]
    async fn test_load_payload_missing_file_is_attachment_read_error() {
        let source = AttachmentSource::new("/nonexistent/recibo.png", "recibo.png", "image/png");
        let err = load_payload(&source).await.unwrap_err();
        assert!(err.is_attachment_read());
    }
}
