//! Matinee Player Application
//!
//! Single-screen terminal video player backed by mpv.
//!
//! This library exposes the shell components for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod keys;
pub mod notify;
pub mod ui;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
