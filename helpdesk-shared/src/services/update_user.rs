/// Update-user operation
///
/// Changes a user's scalar fields and, when a queue list is supplied,
/// replaces the user's queue associations.
///
/// # Flow
///
/// ```text
/// update_user()
///   ├─> find user                  (NotFound if absent)
///   ├─> validate input             (Validation, every failing field)
///   ├─> replace queues             (only if queue_ids is Some)
///   ├─> update supplied fields
///   └─> reload user with queues -> UserView
/// ```
///
/// The steps are not wrapped in a transaction: if a later step fails, the
/// writes already made stay.
///
/// # Example
///
/// ```
/// use helpdesk_shared::services::memory::InMemoryUserStore;
/// use helpdesk_shared::services::update_user::{update_user, UpdateUserData};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryUserStore::new();
/// let user = store.insert_user("Ada", "ada@example.com", "user").await;
///
/// let view = update_user(
///     &store,
///     user.id,
///     UpdateUserData {
///         name: Some("Ada Lovelace".to_string()),
///         ..Default::default()
///     },
/// )
/// .await?;
/// assert_eq!(view.name, "Ada Lovelace");
/// # Ok(())
/// # }
/// ```

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::error::UserServiceError;
use super::store::{UserChanges, UserStore};
use super::view::UserView;

/// Partial user data accepted by [`update_user`]
///
/// Every field is optional; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserData {
    #[validate(length(min = 2, max = 255, message = "Name must have between 2 and 255 characters"))]
    pub name: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,

    /// Plaintext; hashed by the store. An empty string leaves the password
    /// unchanged.
    pub password: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Profile must have between 1 and 32 characters"))]
    pub profile: Option<String>,

    /// New complete set of queue ids. `None` keeps the current set, an
    /// empty list clears it.
    pub queue_ids: Option<Vec<Uuid>>,
}

impl UpdateUserData {
    fn into_parts(self) -> (UserChanges, Option<Vec<Uuid>>) {
        let changes = UserChanges {
            name: self.name,
            email: self.email,
            password: self.password.filter(|p| !p.is_empty()),
            profile: self.profile,
        };

        (changes, self.queue_ids)
    }
}

/// Updates a user and returns the reloaded view
///
/// # Errors
///
/// - [`UserServiceError::NotFound`] if `user_id` doesn't resolve to a user.
///   Checked before validation.
/// - [`UserServiceError::Validation`] if `name` is outside 2..=255
///   characters, `email` is malformed or longer than 255 characters, or
///   `profile` is outside 1..=32 characters
/// - [`UserServiceError::Store`] if the store fails, including unknown
///   queue ids and duplicate emails
#[instrument(skip(store, data))]
pub async fn update_user<S>(
    store: &S,
    user_id: Uuid,
    data: UpdateUserData,
) -> Result<UserView, UserServiceError>
where
    S: UserStore + ?Sized,
{
    if store.find_user(user_id).await?.is_none() {
        debug!("User not found");
        return Err(UserServiceError::NotFound);
    }

    if let Err(errors) = data.validate() {
        let err = UserServiceError::from(errors);
        warn!(error = %err, "Rejected user update");
        return Err(err);
    }

    let (changes, queue_ids) = data.into_parts();

    if let Some(queue_ids) = queue_ids {
        store.replace_user_queues(user_id, &queue_ids).await?;
        debug!(queues = queue_ids.len(), "User queues replaced");
    }

    if store.update_user(user_id, changes).await?.is_none() {
        return Err(UserServiceError::NotFound);
    }

    let (user, queues) = store
        .find_user_with_queues(user_id)
        .await?
        .ok_or(UserServiceError::NotFound)?;

    info!(queues = queues.len(), "User updated");

    Ok(UserView::new(user, queues))
}
