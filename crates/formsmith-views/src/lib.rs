//! # formsmith-views
//!
//! The builder surface of formsmith. [`FormBuilderView`] owns one form under
//! construction and gates every operation on the session's role: admins
//! arrange and configure fields, every logged-in role fills in and submits.
//!
//! ## Modules
//!
//! - [`builder`] - [`FormBuilderView`] and its role checks
//! - [`snapshot`] - [`FieldView`] snapshots for rendering

pub mod builder;
pub mod snapshot;

pub use builder::FormBuilderView;
pub use snapshot::{field_views, field_views_to_json, FieldView};
