use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::queue::QueueSummary;
use crate::models::user::User;

/// Flattened user returned by the user services
///
/// Carries no credentials or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile: String,

    /// Assigned queues, ordered by name
    pub queues: Vec<QueueSummary>,
}

impl UserView {
    pub fn new(user: User, queues: Vec<QueueSummary>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            profile: user.profile,
            queues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_view_omits_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            profile: "admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserView::new(user, vec![])).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["profile"], "admin");
        assert_eq!(json["queues"], serde_json::json!([]));
    }
}
