/// Persistence seam for the user services
///
/// The services in this module only talk to a [`UserStore`]. Production code
/// uses [`PgUserStore`], which delegates to the model methods; tests and
/// demos use [`super::memory::InMemoryUserStore`].
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::services::store::{PgUserStore, UserStore};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgUserStore::new(pool);
/// if let Some((user, queues)) = store.find_user_with_queues(user_id).await? {
///     println!("{} works {} queues", user.name, queues.len());
/// }
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use futures::future::try_join_all;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::queue::QueueSummary;
use crate::models::user::{UpdateUser, User};
use crate::models::user_queue::UserQueue;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password could not be hashed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Write rejected by a uniqueness or reference rule
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Scalar changes to apply to a user
///
/// Unlike [`UpdateUser`], this carries the plaintext password; the store is
/// responsible for hashing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile: Option<String>,
}

/// Collaborator operations needed by the user services
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks up a user by id
    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// Looks up a user by exact email address
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Looks up a user together with its queues, ordered by queue name
    async fn find_user_with_queues(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Option<(User, Vec<QueueSummary>)>>;

    /// Removes every queue association of the user, then associates it with
    /// `queue_ids`
    ///
    /// Duplicate ids yield a single association. Not atomic: a failure part
    /// way through leaves the associations written so far.
    async fn replace_user_queues(&self, user_id: Uuid, queue_ids: &[Uuid]) -> StoreResult<()>;

    /// Applies the supplied changes, returning the updated user or None if
    /// it doesn't exist
    async fn update_user(&self, user_id: Uuid, changes: UserChanges) -> StoreResult<Option<User>>;
}

/// Hashes a supplied password on the blocking thread pool
pub(crate) async fn hash_supplied_password(password: Option<String>) -> StoreResult<Option<String>> {
    let Some(password) = password else {
        return Ok(None);
    };

    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))??;

    Ok(Some(hash))
}

/// PostgreSQL-backed store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, user_id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_with_queues(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Option<(User, Vec<QueueSummary>)>> {
        let Some(user) = User::find_by_id(&self.pool, user_id).await? else {
            return Ok(None);
        };
        let queues = UserQueue::queues_for_user(&self.pool, user_id).await?;

        Ok(Some((user, queues)))
    }

    async fn replace_user_queues(&self, user_id: Uuid, queue_ids: &[Uuid]) -> StoreResult<()> {
        let removed = UserQueue::delete_by_user(&self.pool, user_id).await?;

        // Upserts run concurrently; the first failure is returned.
        let inserted = try_join_all(
            queue_ids
                .iter()
                .map(|queue_id| UserQueue::upsert(&self.pool, user_id, *queue_id)),
        )
        .await?;

        debug!(
            user_id = %user_id,
            removed,
            inserted = inserted.len(),
            "Replaced user queue associations"
        );

        Ok(())
    }

    async fn update_user(&self, user_id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let password_hash = hash_supplied_password(changes.password).await?;

        let update = UpdateUser {
            name: changes.name,
            email: changes.email,
            password_hash,
            profile: changes.profile,
        };

        if update.is_empty() {
            return Ok(User::find_by_id(&self.pool, user_id).await?);
        }

        Ok(User::update(&self.pool, user_id, update).await?)
    }
}
