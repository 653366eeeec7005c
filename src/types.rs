use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

static MESSAGE_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let created_at = OffsetDateTime::now_utc();
        let seq = MESSAGE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("msg-{}-{seq}", created_at.unix_timestamp_nanos() / 1_000_000),
            role,
            content: content.into(),
            created_at,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Supporting snippet returned alongside an answer.
///
/// `text` comes straight from the backend and may carry markup; it must be
/// sanitised before display (see [`crate::charts::citation_plain_text`]).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub source: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

impl ChartKind {
    /// Unknown or missing tags fall back to a bar chart.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("line") => ChartKind::Line,
            Some("pie") => ChartKind::Pie,
            _ => ChartKind::Bar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentStatus {
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Uploading => "Uploading...",
            DocumentStatus::Processing => "Processing...",
            DocumentStatus::Completed => "Completed",
            DocumentStatus::Failed => "Failed",
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, DocumentStatus::Completed | DocumentStatus::Failed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UploadedDocument {
    pub id: String,
    pub name: String,
    /// Lower-cased file extension, or `"file"` when there is none.
    pub kind: String,
    pub status: DocumentStatus,
    pub uploaded_at: OffsetDateTime,
    pub size_label: String,
    pub backend_response: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_defaults_to_bar() {
        assert_eq!(ChartKind::from_tag(None), ChartKind::Bar);
        assert_eq!(ChartKind::from_tag(Some("scatter")), ChartKind::Bar);
        assert_eq!(ChartKind::from_tag(Some("Line")), ChartKind::Line);
        assert_eq!(ChartKind::from_tag(Some("pie")), ChartKind::Pie);
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("a");
        let b = ChatMessage::user("a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn citation_tolerates_missing_fields() {
        let parsed: SourceCitation = serde_json::from_str(r#"{"text":"Revenue grew"}"#).unwrap();
        assert_eq!(parsed.text, "Revenue grew");
        assert_eq!(parsed.kind, "");
        assert_eq!(parsed.score, None);
    }
}
