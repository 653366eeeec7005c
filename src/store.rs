//! Application state shared by the views.
//!
//! A single `AppState` is created by the root component and handed down
//! through context as a `Signal<AppState>`. Views read it freely but mutate it
//! only through the setters below.

use crate::types::{
    ChartKind, ChatMessage, DocumentStatus, SourceCitation, ThemeMode, UploadedDocument,
};
use serde_json::{Map, Value};

pub const GREETING: &str = "Hello! I'm your Financial AI Assistant. Ask me about revenue trends, profit growth, or expense breakdowns, and I'll visualize it instantly!";

/// The chart currently shown in the visualization panel.
///
/// When `image_base64` is set it is rendered as-is and `records` are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartState {
    pub records: Vec<Map<String, Value>>,
    pub kind: ChartKind,
    pub image_base64: Option<String>,
    pub insight: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    theme: ThemeMode,
    messages: Vec<ChatMessage>,
    sources: Vec<SourceCitation>,
    chart: ChartState,
    pending: bool,
    documents: Vec<UploadedDocument>,
}

impl AppState {
    /// Fresh state with the assistant greeting seeded into the chat.
    pub fn with_greeting() -> Self {
        let mut state = Self::default();
        state.push_message(ChatMessage::assistant(GREETING));
        state
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn sources(&self) -> &[SourceCitation] {
        &self.sources
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&UploadedDocument> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    // ---------------
    // Setters
    // ---------------

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear_chat(&mut self) {
        self.messages.clear();
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    pub fn replace_sources(&mut self, sources: Vec<SourceCitation>) {
        self.sources = sources;
    }

    pub fn set_chart(&mut self, chart: ChartState) {
        self.chart = chart;
    }

    /// Drop records and image, leaving only the given caption.
    pub fn clear_chart(&mut self, insight: impl Into<String>) {
        self.chart = ChartState {
            insight: Some(insight.into()),
            ..ChartState::default()
        };
    }

    /// Most recent uploads go first.
    pub fn add_document(&mut self, document: UploadedDocument) {
        self.documents.insert(0, document);
    }

    /// Returns `false` when no document has that id (e.g. it was removed while
    /// its upload was in flight).
    pub fn update_document_status(
        &mut self,
        id: &str,
        status: DocumentStatus,
        backend_response: Option<Value>,
    ) -> bool {
        match self.documents.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                doc.status = status;
                if backend_response.is_some() {
                    doc.backend_response = backend_response;
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_document(&mut self, id: &str) {
        self.documents.retain(|doc| doc.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::new_document;

    #[test]
    fn greeting_is_seeded() {
        let state = AppState::with_greeting();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content, GREETING);
        assert_eq!(state.theme(), ThemeMode::Light);
    }

    #[test]
    fn toggle_theme_flips() {
        let mut state = AppState::default();
        state.toggle_theme();
        assert_eq!(state.theme(), ThemeMode::Dark);
        state.toggle_theme();
        assert_eq!(state.theme(), ThemeMode::Light);
    }

    #[test]
    fn documents_prepend_and_update_by_id() {
        let mut state = AppState::default();
        let first = new_document("q1.pdf", 1024);
        let second = new_document("q2.csv", 2048);
        let (first_id, second_id) = (first.id.clone(), second.id.clone());
        state.add_document(first);
        state.add_document(second);

        assert_eq!(state.documents()[0].id, second_id);
        assert!(state.update_document_status(&first_id, DocumentStatus::Failed, None));
        assert_eq!(state.document(&first_id).unwrap().status, DocumentStatus::Failed);
        assert_eq!(
            state.document(&second_id).unwrap().status,
            DocumentStatus::Uploading
        );

        state.remove_document(&first_id);
        assert!(state.document(&first_id).is_none());
        assert!(!state.update_document_status(&first_id, DocumentStatus::Completed, None));
    }

    #[test]
    fn clear_chat_empties_messages() {
        let mut state = AppState::with_greeting();
        state.push_message(ChatMessage::user("hi"));
        state.clear_chat();
        assert!(state.messages().is_empty());
    }
}
