/// User administration endpoints
///
/// # Endpoints
///
/// - `GET /v1/users/:user_id` - Show a user with its queues
/// - `PUT /v1/users/:user_id` - Update a user (admin only)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use helpdesk_shared::{
    auth::{authorization::require_admin, middleware::AuthContext},
    services::{
        show_user as show_service,
        update_user::{self as update_service, UpdateUserData},
        UserView,
    },
};
use uuid::Uuid;

/// Path ids that aren't UUIDs can't name a user
fn parse_user_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::user_not_found())
}

/// Show user endpoint
///
/// # Endpoint
///
/// ```text
/// GET /v1/users/:user_id
/// Authorization: Bearer <access token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "name": "Ada",
///   "email": "ada@example.com",
///   "profile": "admin",
///   "queues": [{ "id": "uuid", "name": "Support", "color": "#ff0000" }]
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid token
/// - `404 Not Found`: `ERR_NO_USER_FOUND`
pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserView>> {
    let user_id = parse_user_id(&user_id)?;

    let view = show_service::show_user(state.users.as_ref(), user_id).await?;

    Ok(Json(view))
}

/// Update user endpoint
///
/// Updates the supplied fields and, when `queue_ids` is present, replaces
/// the user's queues with exactly that set.
///
/// # Endpoint
///
/// ```text
/// PUT /v1/users/:user_id
/// Authorization: Bearer <access token>
/// Content-Type: application/json
///
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "password": "new-password",
///   "profile": "user",
///   "queue_ids": ["uuid", "uuid"]
/// }
/// ```
///
/// All fields are optional.
///
/// # Response
///
/// The updated user, as for `GET /v1/users/:user_id`.
///
/// # Errors
///
/// - `400 Bad Request`: `ERR_VALIDATION`, including malformed JSON
/// - `401 Unauthorized`: Missing or invalid token
/// - `403 Forbidden`: `ERR_NO_PERMISSION`, caller is not an admin
/// - `404 Not Found`: `ERR_NO_USER_FOUND`
/// - `409 Conflict`: Email taken or unknown queue
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<String>,
    payload: Result<Json<UpdateUserData>, JsonRejection>,
) -> ApiResult<Json<UserView>> {
    require_admin(&auth)?;

    let user_id = parse_user_id(&user_id)?;

    let data = match payload {
        Ok(Json(data)) => data,
        Err(rejection) => {
            // Unknown users are reported ahead of malformed input
            state
                .users
                .find_user(user_id)
                .await?
                .ok_or_else(ApiError::user_not_found)?;
            return Err(rejection.into());
        }
    };

    let view = update_service::update_user(state.users.as_ref(), user_id, data).await?;

    tracing::info!(
        user_id = %view.id,
        updated_by = %auth.user_id,
        "User updated via API"
    );

    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);

        let err = parse_user_id("42").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "ERR_NO_USER_FOUND");
    }
}
