//! Utility functions for formsmith.
//!
//! - [`text`]: String helpers (`capfirst`, comma-separated list splitting).

pub mod text;
