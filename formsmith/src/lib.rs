//! # formsmith
//!
//! Interactive form authoring. Field-type tokens are dropped onto a canvas,
//! each field's validation and options are configured, and the entered
//! values are submitted to a remote endpoint.
//!
//! This is the meta-crate that re-exports the sub-crates behind cargo
//! features. Depend on `formsmith` for everything, or on individual crates
//! for finer-grained control.

/// Errors, settings, and logging setup.
pub use formsmith_core as core;

/// Field definitions, validation binding, the field collection, and edit sessions.
#[cfg(feature = "forms")]
pub use formsmith_forms as forms;

/// Roles and the session context.
#[cfg(feature = "auth")]
pub use formsmith_auth as auth;

/// Submission records, transports, notifications, and the submission pipeline.
#[cfg(feature = "submit")]
pub use formsmith_submit as submit;

/// The role-gated form builder view.
#[cfg(feature = "views")]
pub use formsmith_views as views;

/// Testing tools: notification capture, scripted transports, fixtures.
#[cfg(feature = "testing")]
pub use formsmith_test as test;

/// Re-exports for convenience.
pub mod prelude {
    pub use formsmith_core::{FormsmithError, FormsmithResult, Settings, ValidationError};

    #[cfg(feature = "forms")]
    pub use formsmith_forms::{
        DropEvent, FieldCollection, FieldDefinition, FieldType, FieldValue, Palette,
    };

    #[cfg(feature = "auth")]
    pub use formsmith_auth::{Role, SessionContext};

    #[cfg(feature = "submit")]
    pub use formsmith_submit::{
        HttpTransport, Notifier, SubmissionPipeline, SubmissionRecord, TracingNotifier,
    };

    #[cfg(feature = "views")]
    pub use formsmith_views::FormBuilderView;
}

pub use async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;
