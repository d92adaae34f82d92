/// In-memory user store for testing and demos
///
/// Mirrors the PostgreSQL schema's rules closely enough for the services to
/// behave the same way:
/// - emails are unique across users
/// - associations may only reference existing queues
/// - associations are keyed on `(user_id, queue_id)`, so duplicates collapse
/// - queues are returned ordered by name
///
/// Passwords are hashed with the same Argon2id parameters as production.
///
/// # Example
///
/// ```
/// use helpdesk_shared::services::memory::InMemoryUserStore;
/// use helpdesk_shared::services::store::UserStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryUserStore::new();
/// let user = store.insert_user("Ada", "ada@example.com", "admin").await;
/// assert!(store.find_user(user.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::{hash_supplied_password, StoreError, StoreResult, UserChanges, UserStore};
use crate::models::queue::{Queue, QueueSummary};
use crate::models::user::User;

#[derive(Debug, Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    queues: HashMap<Uuid, Queue>,
    assignments: HashMap<Uuid, BTreeSet<Uuid>>,
}

impl MemoryState {
    fn queues_for(&self, user_id: Uuid) -> Vec<QueueSummary> {
        let mut queues: Vec<QueueSummary> = self
            .assignments
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|queue_id| self.queues.get(queue_id))
            .cloned()
            .map(QueueSummary::from)
            .collect();
        queues.sort_by(|a, b| a.name.cmp(&b.name));
        queues
    }
}

/// Mutex-guarded map implementation of [`UserStore`]
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: Mutex<MemoryState>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user. The password hash is a placeholder that never verifies.
    pub async fn insert_user(&self, name: &str, email: &str, profile: &str) -> User {
        self.seed_user(name, email, profile, "!".to_string()).await
    }

    /// Seeds a user that can log in with `password`
    ///
    /// # Errors
    ///
    /// Returns an error if the password cannot be hashed.
    pub async fn insert_user_with_password(
        &self,
        name: &str,
        email: &str,
        profile: &str,
        password: &str,
    ) -> StoreResult<User> {
        let password_hash = hash_supplied_password(Some(password.to_string()))
            .await?
            .unwrap_or_default();

        Ok(self.seed_user(name, email, profile, password_hash).await)
    }

    async fn seed_user(&self, name: &str, email: &str, profile: &str, password_hash: String) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            profile: profile.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.state.lock().await.users.insert(user.id, user.clone());
        user
    }

    /// Seeds a queue
    pub async fn insert_queue(&self, name: &str, color: &str) -> Queue {
        let now = Utc::now();
        let queue = Queue {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color: color.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.state.lock().await.queues.insert(queue.id, queue.clone());
        queue
    }

    /// Ids of the queues currently associated with the user
    pub async fn assigned_queue_ids(&self, user_id: Uuid) -> BTreeSet<Uuid> {
        self.state
            .lock()
            .await
            .assignments
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_user_with_queues(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Option<(User, Vec<QueueSummary>)>> {
        let state = self.state.lock().await;

        Ok(state
            .users
            .get(&user_id)
            .cloned()
            .map(|user| (user, state.queues_for(user_id))))
    }

    async fn replace_user_queues(&self, user_id: Uuid, queue_ids: &[Uuid]) -> StoreResult<()> {
        let mut state = self.state.lock().await;

        // Deletion happens before the reference check, as it does in SQL.
        state.assignments.remove(&user_id);

        if !state.users.contains_key(&user_id) {
            return Err(StoreError::Conflict(format!("User {} does not exist", user_id)));
        }
        if let Some(missing) = queue_ids.iter().find(|id| !state.queues.contains_key(*id)) {
            return Err(StoreError::Conflict(format!("Queue {} does not exist", missing)));
        }

        state
            .assignments
            .insert(user_id, queue_ids.iter().copied().collect());

        Ok(())
    }

    async fn update_user(&self, user_id: Uuid, changes: UserChanges) -> StoreResult<Option<User>> {
        let password_hash = hash_supplied_password(changes.password).await?;

        let mut state = self.state.lock().await;

        if let Some(email) = &changes.email {
            let taken = state
                .users
                .values()
                .any(|other| other.id != user_id && &other.email == email);
            if taken {
                return Err(StoreError::Conflict("Email already exists".to_string()));
            }
        }

        let Some(user) = state.users.get_mut(&user_id) else {
            return Ok(None);
        };

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
        if let Some(profile) = changes.profile {
            user.profile = profile;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queues_ordered_by_name() {
        let store = InMemoryUserStore::new();
        let user = store.insert_user("Ada", "ada@example.com", "user").await;
        let sales = store.insert_queue("Sales", "#00ff00").await;
        let billing = store.insert_queue("Billing", "#0000ff").await;

        store
            .replace_user_queues(user.id, &[sales.id, billing.id])
            .await
            .unwrap();

        let (_, queues) = store.find_user_with_queues(user.id).await.unwrap().unwrap();
        let names: Vec<_> = queues.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["Billing", "Sales"]);
    }

    #[tokio::test]
    async fn test_duplicate_queue_ids_collapse() {
        let store = InMemoryUserStore::new();
        let user = store.insert_user("Ada", "ada@example.com", "user").await;
        let queue = store.insert_queue("Support", "#ff0000").await;

        store
            .replace_user_queues(user.id, &[queue.id, queue.id])
            .await
            .unwrap();

        assert_eq!(store.assigned_queue_ids(user.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_queue_is_conflict() {
        let store = InMemoryUserStore::new();
        let user = store.insert_user("Ada", "ada@example.com", "user").await;

        let result = store.replace_user_queues(user.id, &[Uuid::new_v4()]).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = InMemoryUserStore::new();
        store.insert_user("Ada", "ada@example.com", "user").await;
        let bob = store.insert_user("Bob", "bob@example.com", "user").await;

        let result = store
            .update_user(
                bob.id,
                UserChanges {
                    email: Some("ada@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));

        // Keeping one's own email is not a conflict
        let result = store
            .update_user(
                bob.id,
                UserChanges {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(result.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_find_user_by_email() {
        let store = InMemoryUserStore::new();
        let ada = store
            .insert_user_with_password("Ada", "ada@example.com", "admin", "secret")
            .await
            .unwrap();

        let found = store.find_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, ada.id);
        assert!(crate::auth::password::verify_password("secret", &found.password_hash).unwrap());

        assert!(store.find_user_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = InMemoryUserStore::new();
        let result = store
            .update_user(Uuid::new_v4(), UserChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
