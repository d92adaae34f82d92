/// User-queue assignment model and database operations
///
/// Implements the many-to-many relationship between users and queues. A row
/// has no identity beyond its `(user_id, queue_id)` pair.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE user_queues (
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     queue_id UUID NOT NULL REFERENCES queues(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     PRIMARY KEY (user_id, queue_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use helpdesk_shared::models::user_queue::UserQueue;
/// use helpdesk_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid, queue_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // Assign twice, still a single row
/// UserQueue::upsert(&pool, user_id, queue_id).await?;
/// UserQueue::upsert(&pool, user_id, queue_id).await?;
///
/// let queues = UserQueue::queues_for_user(&pool, user_id).await?;
/// assert_eq!(queues.len(), 1);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::queue::QueueSummary;

/// Assignment of a user to a queue
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserQueue {
    pub user_id: Uuid,
    pub queue_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserQueue {
    /// Inserts an assignment, or touches `updated_at` if it already exists
    ///
    /// # Errors
    ///
    /// Returns an error if the user or queue doesn't exist (foreign key
    /// violation) or the database connection fails.
    pub async fn upsert(pool: &PgPool, user_id: Uuid, queue_id: Uuid) -> Result<Self, sqlx::Error> {
        let row = sqlx::query_as::<_, UserQueue>(
            r#"
            INSERT INTO user_queues (user_id, queue_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, queue_id) DO UPDATE SET updated_at = NOW()
            RETURNING user_id, queue_id, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(queue_id)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    /// Removes every assignment of a user
    ///
    /// # Returns
    ///
    /// Number of assignments removed
    pub async fn delete_by_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_queues WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Lists the raw assignment rows of a user
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, UserQueue>(
            r#"
            SELECT user_id, queue_id, created_at, updated_at
            FROM user_queues
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Resolves the queues a user is assigned to, ordered by name
    pub async fn queues_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<QueueSummary>, sqlx::Error> {
        let queues = sqlx::query_as::<_, QueueSummary>(
            r#"
            SELECT q.id, q.name, q.color
            FROM queues q
            INNER JOIN user_queues uq ON uq.queue_id = q.id
            WHERE uq.user_id = $1
            ORDER BY q.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(queues)
    }
}
