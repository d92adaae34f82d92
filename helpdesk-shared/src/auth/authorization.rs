/// Authorization checks
///
/// Users carry a single profile tag. `admin` may manage other users; every
/// authenticated profile may read.
///
/// # Example
///
/// ```
/// use helpdesk_shared::auth::authorization::require_admin;
/// use helpdesk_shared::auth::middleware::AuthContext;
/// use uuid::Uuid;
///
/// let auth = AuthContext { user_id: Uuid::new_v4(), profile: "admin".into() };
/// assert!(require_admin(&auth).is_ok());
/// ```

use super::middleware::AuthContext;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller's profile doesn't grant the action
    #[error("Insufficient permissions: requires admin, has {actual}")]
    NotAdmin { actual: String },
}

/// Requires the caller to hold the `admin` profile
pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    if !auth.is_admin() {
        return Err(AuthzError::NotAdmin {
            actual: auth.profile.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn context(profile: &str) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            profile: profile.to_string(),
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&context("admin")).is_ok());
        assert!(require_admin(&context("user")).is_err());
        // Profile tags are case-sensitive
        assert!(require_admin(&context("Admin")).is_err());
    }

    #[test]
    fn test_authz_error_display() {
        let err = require_admin(&context("user")).unwrap_err();
        assert!(err.to_string().contains("requires admin"));
        assert!(err.to_string().contains("user"));
    }
}
