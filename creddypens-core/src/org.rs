//! Organization context.
//!
//! The backend scopes most endpoints to an organization via the `X-Org-Id`
//! header. Instead of threading a nullable string through every call site,
//! the active organization is resolved once at startup into an explicit
//! sum type; org-scoped operations require the `Authenticated` variant and
//! fail fast with [`CreddyError::SignInRequired`] before any network I/O.

use serde::{Deserialize, Serialize};

use crate::error::{CreddyError, CreddyResult};

/// Environment variable carrying the active organization id.
pub const ORG_ID_ENV: &str = "CREDDYPENS_ORG_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrgContext {
    /// No organization id is configured; org-scoped surfaces render a
    /// sign-in-required state and issue no org-scoped requests.
    Unauthenticated,
    /// An active organization id, sent as `X-Org-Id` on scoped calls.
    Authenticated(String),
}

impl OrgContext {
    /// Build a context from an optional raw id, treating empty and
    /// whitespace-only values as absent.
    pub fn from_option(org_id: Option<String>) -> Self {
        match org_id {
            Some(id) if !id.trim().is_empty() => OrgContext::Authenticated(id.trim().to_string()),
            _ => OrgContext::Unauthenticated,
        }
    }

    /// Resolve the context from the environment.
    pub fn from_env() -> Self {
        Self::from_option(std::env::var(ORG_ID_ENV).ok())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, OrgContext::Authenticated(_))
    }

    /// The organization id, if signed in.
    pub fn org_id(&self) -> Option<&str> {
        match self {
            OrgContext::Authenticated(id) => Some(id),
            OrgContext::Unauthenticated => None,
        }
    }

    /// The organization id, or [`CreddyError::SignInRequired`].
    pub fn require(&self) -> CreddyResult<&str> {
        self.org_id().ok_or(CreddyError::SignInRequired)
    }
}

impl Default for OrgContext {
    fn default() -> Self {
        OrgContext::Unauthenticated
    }
}

impl std::fmt::Display for OrgContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgContext::Unauthenticated => write!(f, "unauthenticated"),
            OrgContext::Authenticated(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option() {
        assert_eq!(
            OrgContext::from_option(Some("org_42".to_string())),
            OrgContext::Authenticated("org_42".to_string())
        );
        assert_eq!(OrgContext::from_option(None), OrgContext::Unauthenticated);
        assert_eq!(
            OrgContext::from_option(Some("   ".to_string())),
            OrgContext::Unauthenticated
        );
    }

    #[test]
    fn test_from_option_trims() {
        assert_eq!(
            OrgContext::from_option(Some("  org_42 ".to_string())),
            OrgContext::Authenticated("org_42".to_string())
        );
    }

    #[test]
    fn test_require() {
        let ctx = OrgContext::Authenticated("org_test".to_string());
        assert_eq!(ctx.require().unwrap(), "org_test");

        let err = OrgContext::Unauthenticated.require().unwrap_err();
        assert!(matches!(err, CreddyError::SignInRequired));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            OrgContext::Authenticated("org_1".to_string()).to_string(),
            "org_1"
        );
        assert_eq!(OrgContext::Unauthenticated.to_string(), "unauthenticated");
    }
}
