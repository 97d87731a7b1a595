// Presentation layer - HTTP surface
pub mod app_state;
pub mod error;
pub mod format;
pub mod handlers;
pub mod router;
