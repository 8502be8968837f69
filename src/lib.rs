pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod narration;
pub mod store;
pub mod ui;
pub mod words;
