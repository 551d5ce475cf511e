//! # formsmith-auth
//!
//! Authorization for formsmith. A user logs in with a [`Role`]: admins
//! author forms (add, reorder, configure, and delete fields), users only fill
//! them in and submit.
//!
//! The role lives in an explicit [`SessionContext`] that is handed to the
//! components needing it, with a clear login/logout lifecycle, rather than in
//! process-wide state.
//!
//! - [`role`] - The [`Role`] enum
//! - [`session`] - [`SessionContext`] and its access guards

pub mod role;
pub mod session;

pub use role::Role;
pub use session::SessionContext;
