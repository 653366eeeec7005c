//! Document upload tracking.
//!
//! Each selected file gets an [`UploadedDocument`] immediately (status
//! `Uploading`), then its bytes go to `/parse_router` on their own task.
//! Outcomes are applied by document id, so uploads finishing in any order
//! only ever touch their own record.

use crate::api::{BackendResult, FinanceBackend};
use crate::store::AppState;
use crate::types::{DocumentStatus, UploadedDocument};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Advisory filter for the file picker; not enforced on dropped files.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.xlsx,.xls,.csv";

static DOCUMENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Time-based id with a process-wide sequence suffix.
pub fn next_document_id() -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let seq = DOCUMENT_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{seq}")
}

/// Desktop file engines report full paths; keep only the file name.
pub fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn file_kind(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => "file".to_string(),
    }
}

pub fn size_label(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

pub fn new_document(name: &str, size_bytes: u64) -> UploadedDocument {
    UploadedDocument {
        id: next_document_id(),
        name: name.to_string(),
        kind: file_kind(name),
        status: DocumentStatus::Uploading,
        uploaded_at: OffsetDateTime::now_utc(),
        size_label: size_label(size_bytes),
        backend_response: None,
    }
}

/// Icon family used by the upload list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFamily {
    Pdf,
    Spreadsheet,
    Other,
}

impl FileFamily {
    pub fn of(kind: &str) -> Self {
        match kind {
            "pdf" => FileFamily::Pdf,
            "xlsx" | "xls" | "csv" => FileFamily::Spreadsheet,
            _ => FileFamily::Other,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            FileFamily::Pdf => "file-icon pdf",
            FileFamily::Spreadsheet => "file-icon sheet",
            FileFamily::Other => "file-icon",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            FileFamily::Pdf => "PDF",
            FileFamily::Spreadsheet => "XLS",
            FileFamily::Other => "DOC",
        }
    }
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub document_id: String,
    pub result: BackendResult<serde_json::Value>,
}

/// Create the record for a newly selected file and return its id.
pub fn begin_upload(state: &mut AppState, name: &str, size_bytes: u64) -> String {
    let document = new_document(name, size_bytes);
    let id = document.id.clone();
    tracing::info!(document_id = %id, name, "upload queued");
    state.add_document(document);
    id
}

/// A selected file whose record exists but whose bytes are not read yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingUpload {
    pub document_id: String,
    pub path: String,
    pub name: String,
}

/// Record every file of a selection at once, before any bytes are read.
///
/// `files` yields `(path, size_bytes)` as reported by the file picker.
pub fn begin_batch(
    state: &mut AppState,
    files: impl IntoIterator<Item = (String, u64)>,
) -> Vec<PendingUpload> {
    files
        .into_iter()
        .map(|(path, size)| {
            let name = display_name(&path);
            let document_id = begin_upload(state, &name, size);
            PendingUpload {
                document_id,
                path,
                name,
            }
        })
        .collect()
}

/// The file could not be read locally, so it never reached the backend.
pub fn fail_unreadable(state: &mut AppState, document_id: &str) {
    tracing::warn!(document_id, "could not read selected file");
    state.update_document_status(document_id, DocumentStatus::Failed, None);
}

pub async fn run_upload(
    backend: &dyn FinanceBackend,
    document_id: String,
    file_name: &str,
    bytes: Vec<u8>,
) -> UploadOutcome {
    let result = backend.parse_document(file_name, bytes).await;
    UploadOutcome {
        document_id,
        result,
    }
}

pub fn finish_upload(state: &mut AppState, outcome: UploadOutcome) {
    let (status, response) = match outcome.result {
        Ok(response) => (DocumentStatus::Completed, Some(response)),
        Err(err) => {
            tracing::warn!(document_id = %outcome.document_id, error = %err, "upload failed");
            (DocumentStatus::Failed, None)
        }
    };
    if !state.update_document_status(&outcome.document_id, status, response) {
        tracing::debug!(document_id = %outcome.document_id, "upload settled after removal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BackendError;
    use serde_json::json;

    #[test]
    fn kind_from_extension() {
        assert_eq!(file_kind("Q4_2024_Balance_Sheet.PDF"), "pdf");
        assert_eq!(file_kind("report.tar.gz"), "gz");
        assert_eq!(file_kind("README"), "file");
        assert_eq!(file_kind("trailing."), "file");
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name("/home/ana/reports/q4.pdf"), "q4.pdf");
        assert_eq!(display_name("q4.pdf"), "q4.pdf");
    }

    #[test]
    fn size_label_in_megabytes() {
        assert_eq!(size_label(0), "0.00 MB");
        assert_eq!(size_label(1_572_864), "1.50 MB");
    }

    #[test]
    fn ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..100).map(|_| next_document_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn families() {
        assert_eq!(FileFamily::of("pdf"), FileFamily::Pdf);
        assert_eq!(FileFamily::of("csv"), FileFamily::Spreadsheet);
        assert_eq!(FileFamily::of("docx"), FileFamily::Other);
    }

    #[test]
    fn success_attaches_backend_response() {
        let mut state = AppState::default();
        let id = begin_upload(&mut state, "cash_flow.csv", 2048);
        finish_upload(
            &mut state,
            UploadOutcome {
                document_id: id.clone(),
                result: Ok(json!({"status": "started", "job_id": "abc"})),
            },
        );
        let doc = state.document(&id).unwrap();
        assert_eq!(doc.status, DocumentStatus::Completed);
        assert_eq!(doc.backend_response.as_ref().unwrap()["job_id"], "abc");
    }

    #[test]
    fn failure_marks_failed() {
        let mut state = AppState::default();
        let id = begin_upload(&mut state, "broken.xlsx", 10);
        finish_upload(
            &mut state,
            UploadOutcome {
                document_id: id.clone(),
                result: Err(BackendError::Status {
                    status: 500,
                    detail: None,
                }),
            },
        );
        assert_eq!(state.document(&id).unwrap().status, DocumentStatus::Failed);
    }

    #[test]
    fn batch_records_every_file_before_reading() {
        let mut state = AppState::default();
        let pending = begin_batch(
            &mut state,
            [
                ("/tmp/q1_statement.pdf".to_string(), 1_572_864),
                ("/tmp/ledger.csv".to_string(), 0),
            ],
        );

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].name, "q1_statement.pdf");
        assert_eq!(pending[0].path, "/tmp/q1_statement.pdf");
        assert_eq!(state.documents().len(), 2);
        assert!(
            state
                .documents()
                .iter()
                .all(|doc| doc.status == DocumentStatus::Uploading)
        );
        // Most recent first.
        assert_eq!(state.documents()[0].id, pending[1].document_id);
        assert_eq!(
            state.document(&pending[0].document_id).unwrap().size_label,
            "1.50 MB"
        );
    }

    #[test]
    fn unreadable_file_fails_only_its_record() {
        let mut state = AppState::default();
        let pending = begin_batch(
            &mut state,
            [("a.pdf".to_string(), 10), ("b.pdf".to_string(), 20)],
        );
        fail_unreadable(&mut state, &pending[0].document_id);

        assert_eq!(
            state.document(&pending[0].document_id).unwrap().status,
            DocumentStatus::Failed
        );
        assert_eq!(
            state.document(&pending[1].document_id).unwrap().status,
            DocumentStatus::Uploading
        );
    }
}
