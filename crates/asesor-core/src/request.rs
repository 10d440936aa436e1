//! Outbound request wire model.
//!
//! The remote assistant accepts a single JSON body shape:
//! `{ "text": string, "sessionId": string, "file"?: { "name", "type", "data" } }`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AsesorError, Result};

/// A user-selected file staged for submission.
///
/// This is the draft-side descriptor: it references the file on disk with
/// its display name and declared MIME type. The bytes are only read (and
/// base64-encoded into a [`FilePayload`]) when the request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSource {
    /// Path to the file on disk.
    pub path: PathBuf,
    /// Display name sent to the assistant (usually the file name).
    pub name: String,
    /// Declared MIME type of the file.
    pub mime_type: String,
}

impl AttachmentSource {
    /// Creates a descriptor from explicit metadata.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Encoded attachment as it travels on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    /// Original file name.
    pub name: String,
    /// Declared MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// File body, base64-encoded.
    pub data: String,
}

/// A single request to the remote assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundRequest {
    /// User-entered query text. May be empty when a file is attached.
    pub text: String,
    /// Stable session identifier; identical for every request of a session.
    pub session_id: String,
    /// Encoded attachment, present only when the user selected a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FilePayload>,
}

impl OutboundRequest {
    /// Assembles a request, enforcing that it carries text or a file.
    ///
    /// # Errors
    ///
    /// Returns [`AsesorError::EmptyQuery`] when `text` is blank and no file
    /// is present.
    pub fn new(
        text: impl Into<String>,
        session_id: impl Into<String>,
        file: Option<FilePayload>,
    ) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() && file.is_none() {
            return Err(AsesorError::EmptyQuery);
        }

        Ok(Self {
            text,
            session_id: session_id.into(),
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_text_without_file() {
        let err = OutboundRequest::new("   ", "session-1", None).unwrap_err();
        assert!(matches!(err, AsesorError::EmptyQuery));
    }

    #[test]
    fn test_accepts_file_without_text() {
        let file = FilePayload {
            name: "recibo.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            data: "aGVsbG8=".to_string(),
        };
        let request = OutboundRequest::new("", "session-1", Some(file)).unwrap();
        assert!(request.text.is_empty());
        assert!(request.file.is_some());
    }

    #[test]
    fn test_wire_field_names() {
        let request =
            OutboundRequest::new("¿Cuánto gasté este mes?", "session-1", None).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["text"], "¿Cuánto gasté este mes?");
        assert_eq!(body["sessionId"], "session-1");
        // Absent attachment must not serialize a "file" key at all.
        assert!(body.get("file").is_none());
    }

    #[test]
    fn test_file_payload_wire_shape() {
        let file = FilePayload {
            name: "recibo.png".to_string(),
            mime_type: "image/png".to_string(),
            data: "AQID".to_string(),
        };
        let request = OutboundRequest::new("recibo adjunto", "session-1", Some(file)).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["file"]["name"], "recibo.png");
        assert_eq!(body["file"]["type"], "image/png");
        assert_eq!(body["file"]["data"], "AQID");
    }
}
