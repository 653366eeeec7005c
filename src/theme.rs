use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub root_class: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            root_class: "app-shell",
            toggle_label: "Dark mode",
        },
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            root_class: "app-shell dark",
            toggle_label: "Light mode",
        },
    }
}

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-secondary: #f8fafc;
    --color-card-bg: #ffffff;
    --color-text-primary: #0f172a;
    --color-text-muted: #64748b;
    --color-border: #e2e8f0;
    --color-accent: #2563eb;
    --color-accent-text: #ffffff;
    --color-surface-muted: #f1f5f9;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f1f5f9;
    --color-chat-assistant-text: #0f172a;
    --color-grid: #e2e8f0;
    --color-success: #16a34a;
    --color-danger: #dc2626;
    --color-warning: #ca8a04;
}
body { background: var(--color-bg-secondary); color: var(--color-text-primary); }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #020617;
    --color-bg-secondary: #0b1120;
    --color-card-bg: #0f172a;
    --color-text-primary: #f8fafc;
    --color-text-muted: #94a3b8;
    --color-border: #1e293b;
    --color-accent: #3b82f6;
    --color-accent-text: #ffffff;
    --color-surface-muted: #1e293b;
    --color-input-bg: #020617;
    --color-chat-user-bg: #3b82f6;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1e293b;
    --color-chat-assistant-text: #f8fafc;
    --color-grid: #1e293b;
    --color-success: #22c55e;
    --color-danger: #ef4444;
    --color-warning: #eab308;
}
body { background: var(--color-bg-secondary); color: var(--color-text-primary); }
"#;
