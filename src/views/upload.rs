use crate::api::BackendHandle;
use crate::store::AppState;
use crate::types::{DocumentStatus, UploadedDocument};
use crate::upload::{
    ACCEPTED_EXTENSIONS, FileFamily, begin_batch, fail_unreadable, finish_upload, run_upload,
};
use crate::views::shared::format_upload_date;
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn UploadView() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let backend = use_context::<BackendHandle>();
    let mut dragging = use_signal(|| false);

    let handle_files = use_callback(move |engine: Arc<dyn FileEngine>| {
        let backend = backend.clone();
        spawn(async move {
            let mut selected = Vec::new();
            for path in engine.files() {
                let size = engine.file_size(&path).await.unwrap_or(0);
                selected.push((path, size));
            }
            let pending = state.with_mut(|s| begin_batch(s, selected));

            for upload in pending {
                let engine = engine.clone();
                let backend = backend.clone();
                spawn(async move {
                    let Some(bytes) = engine.read_file(&upload.path).await else {
                        state.with_mut(|s| fail_unreadable(s, &upload.document_id));
                        return;
                    };
                    let outcome =
                        run_upload(&*backend, upload.document_id, &upload.name, bytes).await;
                    state.with_mut(|s| finish_upload(s, outcome));
                });
            }
        });
    });

    let documents = state.read().documents().to_vec();
    let zone_class = if dragging() {
        "drop-zone dragging"
    } else {
        "drop-zone"
    };

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { class: "page-title", "Upload Documents" }
                p { class: "text-muted", "Upload financial statements for analysis" }
            }
            section { class: "card",
                div {
                    class: zone_class,
                    ondragover: move |ev| {
                        ev.prevent_default();
                        dragging.set(true);
                    },
                    ondragleave: move |ev| {
                        ev.prevent_default();
                        dragging.set(false);
                    },
                    ondrop: move |ev| {
                        ev.prevent_default();
                        dragging.set(false);
                        if let Some(engine) = ev.files() {
                            handle_files.call(engine);
                        }
                    },
                    div { class: "drop-icon", dangerous_inner_html: "&#8682;" }
                    h3 { "Drop files here or click to browse" }
                    p { class: "text-muted", "Supports PDF, Excel (.xlsx, .xls), and CSV files" }
                    input {
                        class: "file-input",
                        r#type: "file",
                        multiple: true,
                        accept: ACCEPTED_EXTENSIONS,
                        onchange: move |ev| {
                            if let Some(engine) = ev.files() {
                                handle_files.call(engine);
                            }
                        },
                    }
                    span { class: "btn btn-primary", "Select Files" }
                }
            }
            section { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Uploaded Documents" }
                }
                div { class: "card-body document-list",
                    if documents.is_empty() {
                        p { class: "text-muted", "No documents uploaded yet." }
                    }
                    for doc in documents {
                        DocumentRow { key: "{doc.id}", document: doc }
                    }
                }
            }
        }
    }
}

#[component]
fn DocumentRow(document: UploadedDocument) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let family = FileFamily::of(&document.kind);
    let status_class = match document.status {
        DocumentStatus::Completed => "doc-status completed",
        DocumentStatus::Failed => "doc-status failed",
        DocumentStatus::Uploading | DocumentStatus::Processing => "doc-status busy",
    };
    let uploaded = format_upload_date(document.uploaded_at);
    let doc_id = document.id.clone();

    rsx! {
        div { class: "document-row",
            div { class: family.css_class(), "{family.glyph()}" }
            div { class: "document-meta",
                p { class: "document-name", "{document.name}" }
                div { class: "document-details",
                    span { "{document.size_label}" }
                    span { "{uploaded}" }
                }
            }
            div { class: status_class,
                if !document.status.is_settled() {
                    span { class: "spinner" }
                }
                "{document.status.label()}"
            }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                aria_label: "Remove document",
                onclick: move |_| state.with_mut(|s| s.remove_document(&doc_id)),
                dangerous_inner_html: "&times;"
            }
        }
    }
}
