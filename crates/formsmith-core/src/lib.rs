//! # formsmith-core
//!
//! Core types, settings, and error types for the formsmith form-authoring
//! engine. This crate has no formsmith dependencies and provides the
//! foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Endpoint, notification, and logging configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - Text helpers shared by the field model

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FieldErrors, FormsmithError, FormsmithResult, ValidationError};
pub use settings::Settings;
