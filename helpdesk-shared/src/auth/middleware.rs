/// Request authentication for Axum
///
/// Turns an `Authorization: Bearer <token>` header into an [`AuthContext`].
/// The API crate wires [`authenticate_bearer`] into a
/// `middleware::from_fn_with_state` layer, which inserts the context into
/// request extensions for handlers to pick up.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use helpdesk_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}, profile: {}", auth.user_id, auth.profile)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, Claims, JwtError};
use crate::models::user::ADMIN_PROFILE;

/// Authentication context added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Profile tag carried by the access token
    pub profile: String,
}

impl AuthContext {
    pub fn from_jwt(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            profile: claims.profile.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.profile == ADMIN_PROFILE
    }
}

/// Error type for request authentication
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

/// Authenticates a request from its `Authorization` header
///
/// # Errors
///
/// - [`AuthError::MissingCredentials`] if the header is absent or not ASCII
/// - [`AuthError::InvalidFormat`] if it isn't a Bearer token
/// - [`AuthError::InvalidToken`] if the access token fails validation
pub fn authenticate_bearer(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    Ok(AuthContext::from_jwt(&claims))
}
