//! The singleton user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::require_text;
use crate::errors::AppError;

/// The one profile the service will ever hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(rename = "Last_Updated")]
    pub last_updated: DateTime<Utc>,
    pub username: String,
    pub color: String,
    pub role: String,
}

/// Request body for creating the profile.
///
/// Identifier fields sent by the client are ignored; the store assigns one.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(rename = "Last_Updated", default = "super::now")]
    pub last_updated: DateTime<Utc>,
    pub username: String,
    pub color: String,
    pub role: String,
}

impl CreateProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("username", &self.username)?;
        require_text("color", &self.color)?;
        require_text("role", &self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_timestamp_and_ignores_id() {
        let before = Utc::now();
        let request: CreateProfileRequest = serde_json::from_value(json!({
            "id": "client-chosen",
            "username": "ada",
            "color": "blue",
            "role": "engineer"
        }))
        .unwrap();

        assert!(request.last_updated >= before);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_keeps_supplied_timestamp() {
        let request: CreateProfileRequest = serde_json::from_value(json!({
            "Last_Updated": "2024-02-01T10:00:00Z",
            "username": "ada",
            "color": "blue",
            "role": "engineer"
        }))
        .unwrap();

        assert_eq!(request.last_updated.to_rfc3339(), "2024-02-01T10:00:00+00:00");
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result = serde_json::from_value::<CreateProfileRequest>(json!({
            "username": "ada",
            "color": "blue"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_text_fails_validation() {
        let request: CreateProfileRequest = serde_json::from_value(json!({
            "username": "ada",
            "color": "  ",
            "role": "engineer"
        }))
        .unwrap();

        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_serializes_wire_names() {
        let profile = Profile {
            id: "abc".to_string(),
            last_updated: Utc::now(),
            username: "ada".to_string(),
            color: "blue".to_string(),
            role: "engineer".to_string(),
        };
        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["id"], "abc");
        assert!(value["Last_Updated"].is_string());
        assert_eq!(value["role"], "engineer");
    }
}
