//! The session context: who is logged in, and with which role.
//!
//! A role is set once at login and stays fixed until logout. Components that
//! need authorization receive the context and call its guards.

use formsmith_core::{FormsmithError, FormsmithResult};

use crate::role::Role;

/// The authorization state of one user session.
///
/// # Examples
///
/// ```
/// use formsmith_auth::{Role, SessionContext};
///
/// let mut session = SessionContext::new();
/// assert!(session.require_login().is_err());
///
/// session.login(Role::Admin).unwrap();
/// assert!(session.can_edit());
/// assert!(session.login(Role::User).is_err());
///
/// session.logout();
/// assert!(!session.is_logged_in());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    role: Option<Role>,
}

impl SessionContext {
    /// Creates a session with no role.
    pub const fn new() -> Self {
        Self { role: None }
    }

    /// Creates a session already logged in with `role`.
    pub const fn with_role(role: Role) -> Self {
        Self { role: Some(role) }
    }

    /// Sets the role for this session.
    ///
    /// Fails with `AlreadyLoggedIn` if a role is already set; log out first
    /// to switch roles.
    pub fn login(&mut self, role: Role) -> FormsmithResult<()> {
        if let Some(current) = self.role {
            tracing::warn!(current = %current, requested = %role, "login while already logged in");
            return Err(FormsmithError::AlreadyLoggedIn);
        }
        self.role = Some(role);
        tracing::info!(role = %role, "logged in");
        Ok(())
    }

    /// Clears the role, ending the session.
    pub fn logout(&mut self) {
        if let Some(role) = self.role.take() {
            tracing::info!(role = %role, "logged out");
        }
    }

    /// Returns the current role, if logged in.
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns `true` if a role is set.
    pub const fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    /// Returns `true` if logged in as admin.
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin))
    }

    /// Returns `true` if logged in as a plain user.
    pub const fn is_user(&self) -> bool {
        matches!(self.role, Some(Role::User))
    }

    /// Returns `true` if field-editing affordances should be enabled.
    pub const fn can_edit(&self) -> bool {
        self.is_admin()
    }

    /// Guard for views that need any logged-in role.
    pub fn require_login(&self) -> FormsmithResult<Role> {
        self.role.ok_or(FormsmithError::NotLoggedIn)
    }

    /// Guard for editing operations; `action` names the denied operation.
    pub fn require_admin(&self, action: &str) -> FormsmithResult<()> {
        match self.require_login()? {
            Role::Admin => Ok(()),
            Role::User => {
                tracing::warn!(action, "editing denied for user role");
                Err(FormsmithError::PermissionDenied(format!(
                    "only admins may {action}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unset() {
        let s = SessionContext::new();
        assert_eq!(s.role(), None);
        assert!(!s.is_logged_in());
        assert!(!s.is_admin());
        assert!(!s.is_user());
        assert!(!s.can_edit());
    }

    #[test]
    fn test_login_admin() {
        let mut s = SessionContext::new();
        s.login(Role::Admin).unwrap();
        assert_eq!(s.role(), Some(Role::Admin));
        assert!(s.is_admin());
        assert!(s.can_edit());
        assert!(s.require_admin("add fields").is_ok());
    }

    #[test]
    fn test_login_user() {
        let mut s = SessionContext::new();
        s.login(Role::User).unwrap();
        assert!(s.is_user());
        assert!(!s.can_edit());
        assert_eq!(s.require_login().unwrap(), Role::User);
    }

    #[test]
    fn test_role_is_set_once() {
        let mut s = SessionContext::with_role(Role::User);
        assert!(matches!(
            s.login(Role::Admin),
            Err(FormsmithError::AlreadyLoggedIn)
        ));
        assert_eq!(s.role(), Some(Role::User));
    }

    #[test]
    fn test_logout_then_login_again() {
        let mut s = SessionContext::with_role(Role::User);
        s.logout();
        assert!(!s.is_logged_in());
        s.login(Role::Admin).unwrap();
        assert!(s.is_admin());
    }

    #[test]
    fn test_require_login_unset() {
        let s = SessionContext::new();
        assert!(matches!(s.require_login(), Err(FormsmithError::NotLoggedIn)));
        assert!(matches!(
            s.require_admin("delete fields"),
            Err(FormsmithError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_require_admin_as_user() {
        let s = SessionContext::with_role(Role::User);
        let err = s.require_admin("delete fields").unwrap_err();
        assert_eq!(err.to_string(), "Permission denied: only admins may delete fields");
    }
}
