use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - the account that authors posts.
///
/// Accounts are owned by the authentication system. A copy is recorded the
/// first time a privileged caller writes, so author names can be shown and
/// searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Create a regular account with a generated ID.
    pub fn new(username: String, first_name: String, last_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            first_name,
            last_name,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
