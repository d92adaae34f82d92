/// Queue model and database operations
///
/// A queue is a named routing bucket that tickets land in. Users are
/// assigned to queues through [`super::user_queue::UserQueue`]. Queues are
/// read-only from the user administration flows.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE queues (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL UNIQUE,
///     color VARCHAR(32) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Queue model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Queue {
    /// Unique queue ID
    pub id: Uuid,

    /// Queue label shown to agents
    pub name: String,

    /// Display color (e.g. `#7c7c7c`)
    pub color: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact queue representation embedded in user views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QueueSummary {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl From<Queue> for QueueSummary {
    fn from(queue: Queue) -> Self {
        Self {
            id: queue.id,
            name: queue.name,
            color: queue.color,
        }
    }
}

/// Input for creating a new queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQueue {
    pub name: String,
    pub color: String,
}

impl Queue {
    /// Creates a new queue
    ///
    /// # Errors
    ///
    /// Returns an error if the name or color is already taken.
    pub async fn create(pool: &PgPool, data: CreateQueue) -> Result<Self, sqlx::Error> {
        let queue = sqlx::query_as::<_, Queue>(
            r#"
            INSERT INTO queues (name, color)
            VALUES ($1, $2)
            RETURNING id, name, color, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.color)
        .fetch_one(pool)
        .await?;

        Ok(queue)
    }

    /// Lists all queues ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let queues = sqlx::query_as::<_, Queue>(
            r#"
            SELECT id, name, color, created_at, updated_at
            FROM queues
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(queues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_queue() {
        let queue = Queue {
            id: Uuid::new_v4(),
            name: "Billing".to_string(),
            color: "#ff0000".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = QueueSummary::from(queue.clone());
        assert_eq!(summary.id, queue.id);
        assert_eq!(summary.name, "Billing");
        assert_eq!(summary.color, "#ff0000");
    }
}
