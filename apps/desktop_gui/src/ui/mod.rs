//! UI layer for desktop GUI: app shell, event modal, and confirmation dialog.

pub mod app;
pub mod modal;

pub use app::EventsApp;
