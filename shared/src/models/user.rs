use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Id;

closed_enum! {
    /// Staff role. Drives every permission decision in the UI.
    pub enum Role {
        #[serde(alias = "super-manager", alias = "SUPER_MANAGER")]
        SuperManager => ("super_manager", "Super Manager"),
        #[serde(alias = "MANAGER")]
        Manager => ("manager", "Manager"),
        #[serde(alias = "collection-officer", alias = "COLLECTION_OFFICER")]
        CollectionOfficer => ("collection_officer", "Collection Officer"),
        #[serde(alias = "calling-agent", alias = "CALLING_AGENT")]
        CallingAgent => ("calling_agent", "Calling Agent"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
}

impl User {
    /// "First Last", falling back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Body for `POST users/` and `PUT users/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body for `POST token/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response of `POST token/`. Some deployments embed the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST token/refresh/`. `refresh` is present when the server
/// rotates refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_spelling() {
        let role: Role = serde_json::from_str("\"calling_agent\"").unwrap();
        assert_eq!(role, Role::CallingAgent);
        let role: Role = serde_json::from_str("\"super-manager\"").unwrap();
        assert_eq!(role, Role::SuperManager);
        assert_eq!(serde_json::to_string(&Role::CollectionOfficer).unwrap(), "\"collection_officer\"");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"admin\"").is_err());
        assert!("admin".parse::<Role>().is_err());
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
    }

    #[test]
    fn test_user_from_api() {
        let json = r#"{
            "id": 3,
            "username": "jdoe",
            "email": "jdoe@example.com",
            "first_name": "Jane",
            "last_name": "Doe",
            "role": "collection_officer",
            "is_active": true
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_str(), "3");
        assert_eq!(user.display_name(), "Jane Doe");
        assert_eq!(user.phone_number, None);
    }

    #[test]
    fn test_password_omitted_when_absent() {
        let payload = UserPayload {
            username: "jdoe".into(),
            email: "jdoe@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            role: Role::Manager,
            phone_number: None,
            is_active: true,
            password: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("password").is_none());
    }
}
