pub mod api;
pub mod charts;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod settings;
pub mod store;
pub mod theme;
pub mod types;
pub mod upload;
pub mod ui;
pub mod views;
