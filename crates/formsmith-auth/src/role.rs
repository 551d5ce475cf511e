//! User roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use formsmith_core::FormsmithError;

/// The role chosen at login.
///
/// A session with no role is not logged in; see
/// [`SessionContext`](crate::session::SessionContext).
///
/// The login screen preselects the least privileged role, which is also the
/// `Default`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May author forms as well as fill them in.
    Admin,
    /// May only fill in and submit forms.
    #[default]
    User,
}

impl Role {
    /// Returns the lowercase name of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Returns `true` if this role may change the structure of a form.
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = FormsmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(FormsmithError::PermissionDenied(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}
