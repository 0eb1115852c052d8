use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account as returned by `/auth/register` and `/auth/me`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

/// Generic `{"message": ...}` acknowledgment.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_password_hash_and_parses_naive_timestamp() {
        let user: User = serde_json::from_str(
            r#"{
                "full_name": "Asha Rao",
                "email": "asha@example.com",
                "hashed_password": "$2b$12$...",
                "created_at": "2025-01-14T09:30:12.123456"
            }"#,
        )
        .unwrap();
        assert_eq!(user.email, "asha@example.com");
        assert!(user.id.is_none());
        assert!(user.created_at.is_some());
    }

    #[test]
    fn ack_tolerates_missing_message() {
        let ack: Ack = serde_json::from_str("{}").unwrap();
        assert_eq!(ack, Ack::default());
    }
}
