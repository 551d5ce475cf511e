//! # formsmith-forms
//!
//! The field-configuration and dynamic-validation engine of formsmith.
//!
//! - [`field`] - Field definitions, field types, and typed values
//! - [`validators`] - Single-constraint validators
//! - [`binder`] - Deriving rule sets from definitions and binding them to controls
//! - [`control`] - Live per-field state: value, rules, verdict
//! - [`collection`] - The ordered field list and its structural operations
//! - [`edit_session`] - Scratch copies of one field's configuration
//! - [`palette`] - Field-type palette and drop events

pub mod binder;
pub mod collection;
pub mod control;
pub mod edit_session;
pub mod field;
pub mod palette;
pub mod validators;

pub use binder::RuleSet;
pub use collection::{FieldCollection, FieldEntry};
pub use control::Control;
pub use edit_session::{EditSession, EditState, FieldDraft};
pub use field::{FieldDefinition, FieldType, FieldValue};
pub use palette::{DropEvent, Palette};
