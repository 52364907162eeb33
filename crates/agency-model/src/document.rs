//! Documents and file metadata
//!
//! Nothing here touches file contents. A document is the metadata row the
//! file browser shows; "download" and "delete" act on the row only.

use crate::date::flexible_timestamp;
use crate::error::{ModelError, ModelResult};
use crate::ids::DocumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Broad file category derived from the type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Pdf,
    Document,
    Spreadsheet,
    Image,
    Archive,
    Audio,
    Video,
    Other,
}

impl FileCategory {
    /// Classify a type tag or extension, case-insensitively
    #[must_use]
    pub fn from_type_tag(tag: &str) -> Self {
        match tag.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => FileCategory::Pdf,
            "doc" | "docx" => FileCategory::Document,
            "xls" | "xlsx" => FileCategory::Spreadsheet,
            "png" | "jpg" | "jpeg" | "gif" | "webp" => FileCategory::Image,
            "zip" | "rar" | "7z" => FileCategory::Archive,
            "mp3" | "wav" | "ogg" => FileCategory::Audio,
            "mp4" | "mov" | "avi" => FileCategory::Video,
            _ => FileCategory::Other,
        }
    }

    /// Lowercase label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Pdf => "pdf",
            FileCategory::Document => "document",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Image => "image",
            FileCategory::Archive => "archive",
            FileCategory::Audio => "audio",
            FileCategory::Video => "video",
            FileCategory::Other => "other",
        }
    }
}

impl FromStr for FileCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(FileCategory::Pdf),
            "document" => Ok(FileCategory::Document),
            "spreadsheet" => Ok(FileCategory::Spreadsheet),
            "image" => Ok(FileCategory::Image),
            "archive" => Ok(FileCategory::Archive),
            "audio" => Ok(FileCategory::Audio),
            "video" => Ok(FileCategory::Video),
            "other" => Ok(FileCategory::Other),
            other => Err(ModelError::unknown_value("file category", other)),
        }
    }
}

/// Document metadata row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    /// Client name (free text, not a reference)
    #[serde(default)]
    pub client: String,
    /// Project name (free text, not a reference)
    #[serde(default)]
    pub project: String,
    /// Type tag as shown in the table (PDF, DOCX, Contract, ...)
    #[serde(rename = "type", default)]
    pub file_type: String,
    /// Human readable size ("1.2 MB")
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(with = "flexible_timestamp", alias = "uploaded")]
    pub uploaded_on: DateTime<Utc>,
}

impl Document {
    /// Create a document row
    #[must_use]
    pub fn new(
        id: impl Into<DocumentId>,
        name: impl Into<String>,
        file_type: impl Into<String>,
        uploaded_on: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: String::new(),
            project: String::new(),
            file_type: file_type.into(),
            size: String::new(),
            uploaded_by: String::new(),
            uploaded_on,
        }
    }

    /// With client and project
    #[inline]
    #[must_use]
    pub fn for_client(mut self, client: impl Into<String>, project: impl Into<String>) -> Self {
        self.client = client.into();
        self.project = project.into();
        self
    }

    /// With uploader
    #[inline]
    #[must_use]
    pub fn uploaded_by(mut self, who: impl Into<String>) -> Self {
        self.uploaded_by = who.into();
        self
    }

    /// With display size
    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Category of the type tag, falling back to the name's extension
    #[must_use]
    pub fn category(&self) -> FileCategory {
        match FileCategory::from_type_tag(&self.file_type) {
            FileCategory::Other => self
                .name
                .rsplit_once('.')
                .map_or(FileCategory::Other, |(_, ext)| FileCategory::from_type_tag(ext)),
            category => category,
        }
    }

    /// Check ingestion invariants
    ///
    /// # Errors
    /// Returns [`ModelError::MissingField`] for a blank name.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("document.name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_type_tags() {
        assert_eq!(FileCategory::from_type_tag("PDF"), FileCategory::Pdf);
        assert_eq!(FileCategory::from_type_tag("xlsx"), FileCategory::Spreadsheet);
        assert_eq!(FileCategory::from_type_tag(".JPEG"), FileCategory::Image);
        assert_eq!(FileCategory::from_type_tag("7z"), FileCategory::Archive);
        assert_eq!(FileCategory::from_type_tag("Contract"), FileCategory::Other);
    }

    #[test]
    fn category_falls_back_to_extension() {
        let doc = Document::new("doc-001", "Contract Agreement.pdf", "Contract", Utc::now());
        assert_eq!(doc.category(), FileCategory::Pdf);
    }

    #[test]
    fn deserializes_client_portal_shape() {
        let json = r#"{"id": "doc-002", "name": "Invoice_INV-015.pdf", "type": "Invoice", "uploaded": "2025-04-15"}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.file_type, "Invoice");
        assert_eq!(doc.uploaded_on.to_rfc3339(), "2025-04-15T00:00:00+00:00");
    }
}
