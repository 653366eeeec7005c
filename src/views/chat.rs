use crate::api::BackendHandle;
use crate::charts::{citation_plain_text, format_score};
use crate::chat::{THINKING_LABEL, begin_exchange, finish_exchange, run_exchange};
use crate::store::AppState;
use crate::types::{ChatMessage, Role, SourceCitation};
use crate::views::charts::ChartPanel;
use crate::views::shared::{format_message_time, markdown_to_html};
use dioxus::events::Key;
use dioxus::prelude::*;

#[component]
pub fn ChatView() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let backend = use_context::<BackendHandle>();
    let mut input = use_signal(String::new);

    let send_message = use_callback(move |text: String| {
        let Some(query) = state.with_mut(|s| begin_exchange(s, &text)) else {
            return;
        };
        input.set(String::new());

        let backend = backend.clone();
        spawn(async move {
            tracing::info!(query = %query, "chat exchange started");
            let outcome = run_exchange(&*backend, &query).await;
            state.with_mut(|s| finish_exchange(s, outcome));
        });
    });

    let snapshot = state.read();
    let messages = snapshot.messages().to_vec();
    let sources = snapshot.sources().to_vec();
    let chart = snapshot.chart().clone();
    let pending = snapshot.is_pending();
    drop(snapshot);

    rsx! {
        div { class: "page chat-page",
            div { class: "chat-grid",
                section { class: "card chat-card",
                    div { class: "card-header",
                        div {
                            h2 { class: "card-title", "Financial AI Chat" }
                            p { class: "text-muted", "Ask about revenue, expenses, or ratios" }
                        }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            disabled: pending || messages.is_empty(),
                            onclick: move |_| state.with_mut(|s| s.clear_chat()),
                            "Clear"
                        }
                    }
                    div { id: "chat-list", class: "chat-list",
                        for msg in messages.iter() {
                            MessageRow { key: "{msg.id}", message: msg.clone() }
                        }
                        if pending {
                            div { class: "message-row assistant",
                                div { class: "avatar assistant", "AI" }
                                div { class: "shimmer-line",
                                    span { class: "shimmer-text", "{THINKING_LABEL}" }
                                }
                            }
                        }
                    }
                    form { class: "composer",
                        onsubmit: move |ev| {
                            ev.prevent_default();
                            send_message.call(input());
                        },
                        input {
                            class: "text-input",
                            r#type: "text",
                            placeholder: "Ask about financials...",
                            value: "{input}",
                            oninput: move |ev| input.set(ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                    ev.prevent_default();
                                    send_message.call(input());
                                }
                            },
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: pending || input().trim().is_empty(),
                            onclick: move |_| send_message.call(input()),
                            "Send"
                        }
                    }
                }
                section { class: "card insights-card",
                    div { class: "card-header",
                        div {
                            h2 { class: "card-title", "Financial Insights" }
                            p { class: "text-muted", "Charts and detailed data" }
                        }
                    }
                    div { class: "card-body",
                        ChartPanel { chart }
                        if !sources.is_empty() {
                            SourceTable { sources }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage) -> Element {
    let role_class = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let timestamp = format_message_time(message.created_at);

    rsx! {
        div { class: "message-row {role_class}",
            if matches!(message.role, Role::Assistant) {
                div { class: "avatar assistant", "AI" }
            }
            div { class: "message-stack",
                div { class: "bubble {role_class}",
                    if matches!(message.role, Role::Assistant) {
                        div { class: "md", dangerous_inner_html: "{markdown_to_html(&message.content)}" }
                    } else {
                        "{message.content}"
                    }
                }
                span { class: "message-timestamp", "{timestamp}" }
            }
            if matches!(message.role, Role::User) {
                div { class: "avatar user", "You" }
            }
        }
    }
}

#[component]
fn SourceTable(sources: Vec<SourceCitation>) -> Element {
    rsx! {
        div { class: "source-table-wrap",
            h3 { class: "section-title", "Source Data" }
            table { class: "source-table",
                thead {
                    tr {
                        th { "Type" }
                        th { "Text" }
                        th { "Score" }
                        th { "Source" }
                    }
                }
                tbody {
                    for source in sources.iter() {
                        tr {
                            td { "{source.kind}" }
                            td { "{citation_plain_text(&source.text)}" }
                            td { class: "numeric", "{format_score(source.score)}" }
                            td { "{source.source}" }
                        }
                    }
                }
            }
        }
    }
}
