pub mod charts;
pub mod chat;
pub mod dashboard;
pub mod insights;
pub mod settings;
pub mod shared;
pub mod upload;

pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use insights::InsightsView;
pub use settings::SettingsView;
pub use upload::UploadView;
