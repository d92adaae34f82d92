/// Show-user operation
use tracing::{debug, instrument};
use uuid::Uuid;

use super::error::UserServiceError;
use super::store::UserStore;
use super::view::UserView;

/// Loads a user with its queues
///
/// # Errors
///
/// [`UserServiceError::NotFound`] if the user doesn't exist,
/// [`UserServiceError::Store`] if the store fails.
#[instrument(skip(store))]
pub async fn show_user<S>(store: &S, user_id: Uuid) -> Result<UserView, UserServiceError>
where
    S: UserStore + ?Sized,
{
    let (user, queues) = store
        .find_user_with_queues(user_id)
        .await?
        .ok_or(UserServiceError::NotFound)?;

    debug!(queues = queues.len(), "User loaded");

    Ok(UserView::new(user, queues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::InMemoryUserStore;

    #[tokio::test]
    async fn test_show_user() {
        let store = InMemoryUserStore::new();
        let user = store.insert_user("Ada", "ada@example.com", "admin").await;
        let queue = store.insert_queue("Support", "#ff0000").await;
        store.replace_user_queues(user.id, &[queue.id]).await.unwrap();

        let view = show_user(&store, user.id).await.unwrap();
        assert_eq!(view.email, "ada@example.com");
        assert_eq!(view.queues.len(), 1);
    }

    #[tokio::test]
    async fn test_show_missing_user() {
        let store = InMemoryUserStore::new();
        let result = show_user(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(UserServiceError::NotFound)));
    }
}
