use crate::api::BackendHandle;
use crate::settings::{Notice, NoticeKind, submit_api_key, validate_api_key};
use crate::store::AppState;
use crate::types::ThemeMode;
use dioxus::prelude::*;

#[component]
pub fn SettingsView() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let backend = use_context::<BackendHandle>();
    let mut api_key = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let submit = use_callback(move |_: ()| {
        if loading() {
            return;
        }
        let key = match validate_api_key(&api_key()) {
            Ok(key) => key.to_string(),
            Err(err) => {
                notice.set(Some(err.into()));
                return;
            }
        };

        loading.set(true);
        let backend = backend.clone();
        spawn(async move {
            let result = submit_api_key(&*backend, &key).await;
            if result.kind == NoticeKind::Success {
                api_key.set(String::new());
            }
            notice.set(Some(result));
            loading.set(false);
        });
    });

    let theme = state.read().theme();
    let button_label = if loading() { "Loading..." } else { "Load API Key" };

    rsx! {
        div { class: "page",
            div { class: "page-header",
                h1 { class: "page-title", "Settings" }
                p { class: "text-muted", "Connect FinSight to your analysis backend" }
            }
            section { class: "card settings-section",
                h3 { class: "section-title", "API Key" }
                p { class: "text-muted", "The key is sent to the backend once and never stored here." }
                form { class: "api-key-form",
                    onsubmit: move |ev| {
                        ev.prevent_default();
                        submit.call(());
                    },
                    input {
                        class: "text-input",
                        r#type: "password",
                        placeholder: "Enter your API key",
                        autocomplete: "off",
                        value: "{api_key}",
                        oninput: move |ev| api_key.set(ev.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: loading(),
                        "{button_label}"
                    }
                }
                if let Some(current) = notice() {
                    NoticeBanner { notice: current }
                }
            }
            section { class: "card settings-section",
                h3 { class: "section-title", "Display" }
                div { class: "theme-toggle",
                    for mode in [ThemeMode::Light, ThemeMode::Dark] {
                        button {
                            class: if theme == mode { "theme-option active" } else { "theme-option" },
                            r#type: "button",
                            onclick: move |_| state.with_mut(|s| s.set_theme(mode)),
                            "{theme_label(mode)}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NoticeBanner(notice: Notice) -> Element {
    let class = match notice.kind {
        NoticeKind::Success => "notice success",
        NoticeKind::Error => "notice error",
    };
    rsx! {
        div { class: class, role: "status",
            strong { "{notice.title}" }
            p { "{notice.description}" }
        }
    }
}

fn theme_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "Light",
        ThemeMode::Dark => "Dark",
    }
}
