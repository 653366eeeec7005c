use crate::api::{BackendHandle, HttpBackend};
use crate::config::BackendConfig;
use crate::dashboard::SampleData;
use crate::store::AppState;
use crate::theme::theme_definition;
use crate::views::{ChatView, DashboardView, InsightsView, SettingsView, UploadView};
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const FINSIGHT_CSS: Asset = asset!("/assets/finsight.css");

static BACKEND: OnceCell<BackendHandle> = OnceCell::new();

/// Register the backend before launch; the first registration wins.
pub fn install_backend(handle: BackendHandle) {
    if BACKEND.set(handle).is_err() {
        tracing::debug!("backend already installed");
    }
}

fn backend_handle() -> BackendHandle {
    BACKEND
        .get_or_init(|| BackendHandle::new(HttpBackend::new(BackendConfig::from_env())))
        .clone()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Dashboard,
    Upload,
    Chat,
    Insights,
    Settings,
}

impl AppRoute {
    pub const ALL: [AppRoute; 5] = [
        AppRoute::Dashboard,
        AppRoute::Upload,
        AppRoute::Chat,
        AppRoute::Insights,
        AppRoute::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AppRoute::Dashboard => "Dashboard",
            AppRoute::Upload => "Upload",
            AppRoute::Chat => "Chat",
            AppRoute::Insights => "Insights",
            AppRoute::Settings => "Settings",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            AppRoute::Dashboard => "&#9638;",
            AppRoute::Upload => "&#8682;",
            AppRoute::Chat => "&#128172;",
            AppRoute::Insights => "&#128161;",
            AppRoute::Settings => "&#9881;",
        }
    }
}

#[component]
pub fn App() -> Element {
    let state = use_context_provider(|| Signal::new(AppState::with_greeting()));
    use_context_provider(backend_handle);
    let active_route = use_signal(|| AppRoute::Dashboard);

    let theme = theme_definition(state.read().theme());

    rsx! {
        document::Link { rel: "stylesheet", href: FINSIGHT_CSS }
        style { dangerous_inner_html: "{theme.css}" }
        div { class: "{theme.root_class}",
            Sidebar { active_route }
            div { class: "main-column",
                Navbar { active_route }
                RoutePanels { active_route }
            }
        }
    }
}

#[component]
fn Sidebar(active_route: Signal<AppRoute>) -> Element {
    rsx! {
        aside { class: "sidebar",
            div { class: "sidebar-brand",
                div { class: "brand-mark", dangerous_inner_html: "&#8599;" }
                div {
                    h1 { class: "brand-title", "FinSight AI" }
                    p { class: "brand-subtitle", "Financial Analysis" }
                }
            }
            nav { class: "sidebar-nav",
                for route in AppRoute::ALL {
                    SidebarLink { active_route, route }
                }
            }
        }
    }
}

#[component]
fn SidebarLink(active_route: Signal<AppRoute>, route: AppRoute) -> Element {
    let mut active_route = active_route;
    let class = if active_route() == route {
        "nav-link active"
    } else {
        "nav-link"
    };
    rsx! {
        button {
            class: class,
            r#type: "button",
            onclick: move |_| active_route.set(route),
            span { class: "nav-icon", dangerous_inner_html: route.icon() }
            "{route.label()}"
        }
    }
}

#[component]
fn Navbar(active_route: Signal<AppRoute>) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let theme = theme_definition(state.read().theme());
    rsx! {
        header { class: "navbar",
            h2 { class: "navbar-title", "{active_route().label()}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| state.with_mut(|s| s.toggle_theme()),
                "{theme.toggle_label}"
            }
        }
    }
}

#[component]
fn RoutePanels(active_route: Signal<AppRoute>) -> Element {
    rsx! {
        main { class: "route-panels",
            RoutePanel {
                active_route,
                route: AppRoute::Dashboard,
                children: rsx!( DashboardView { source: SampleData } ),
            }
            RoutePanel {
                active_route,
                route: AppRoute::Upload,
                children: rsx!( UploadView {} ),
            }
            RoutePanel {
                active_route,
                route: AppRoute::Chat,
                children: rsx!( ChatView {} ),
            }
            RoutePanel {
                active_route,
                route: AppRoute::Insights,
                children: rsx!( InsightsView { source: SampleData } ),
            }
            RoutePanel {
                active_route,
                route: AppRoute::Settings,
                children: rsx!( SettingsView {} ),
            }
        }
    }
}

// Panels stay mounted so in-flight requests spawned by a page survive
// navigating away from it.
#[component]
fn RoutePanel(active_route: Signal<AppRoute>, route: AppRoute, children: Element) -> Element {
    let is_active = active_route() == route;
    let class_suffix = if is_active { "active" } else { "" };
    rsx! {
        div {
            class: format_args!("route-panel {}", class_suffix),
            aria_hidden: (!is_active).to_string(),
            {children}
        }
    }
}
