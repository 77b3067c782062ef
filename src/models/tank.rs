//! Tank records and their partial update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{number_or_text, optional_number_or_text, require_finite, require_text};
use crate::errors::AppError;

/// A water tank at a named location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tank {
    pub id: String,
    #[serde(rename = "Last_Updated")]
    pub last_updated: DateTime<Utc>,
    pub location: String,
    pub lat: f64,
    pub long: f64,
}

/// Request body for creating a tank.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTankRequest {
    #[serde(rename = "Last_Updated", default = "super::now")]
    pub last_updated: DateTime<Utc>,
    pub location: String,
    #[serde(deserialize_with = "number_or_text")]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_text")]
    pub long: f64,
}

impl CreateTankRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("location", &self.location)?;
        require_finite("lat", self.lat)?;
        require_finite("long", self.long)
    }
}

/// Request body for patching a tank. Absent and `null` fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TankUpdate {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "optional_number_or_text")]
    pub long: Option<f64>,
}

impl TankUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        if let Some(lat) = self.lat {
            require_finite("lat", lat)?;
        }
        if let Some(long) = self.long {
            require_finite("long", long)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_coordinates_coerce() {
        let request: CreateTankRequest = serde_json::from_value(json!({
            "location": "Roof",
            "lat": 18,
            "long": -77
        }))
        .unwrap();

        assert_eq!(request.lat, 18.0);
        assert_eq!(request.long, -77.0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = serde_json::from_value::<CreateTankRequest>(json!({
            "location": "Roof",
            "lat": "north",
            "long": 1.0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_text_coordinates_coerce() {
        let request: CreateTankRequest = serde_json::from_value(json!({
            "location": "Roof",
            "lat": "18.5",
            "long": "-76.8"
        }))
        .unwrap();
        assert_eq!(request.lat, 18.5);
        assert_eq!(request.long, -76.8);

        let update: TankUpdate = serde_json::from_value(json!({ "long": "2" })).unwrap();
        assert_eq!(update.long, Some(2.0));
    }

    #[test]
    fn test_non_finite_text_fails_validation() {
        let request: CreateTankRequest = serde_json::from_value(json!({
            "location": "Roof",
            "lat": "NaN",
            "long": 1
        }))
        .unwrap();
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_fields_are_optional() {
        let update: TankUpdate = serde_json::from_value(json!({ "location": "Yard" })).unwrap();
        assert_eq!(update.location.as_deref(), Some("Yard"));
        assert!(update.lat.is_none());
        assert!(update.long.is_none());

        let nulls: TankUpdate = serde_json::from_value(json!({ "lat": null })).unwrap();
        assert!(nulls.lat.is_none());
    }

    #[test]
    fn test_update_rejects_blank_location() {
        let update = TankUpdate {
            location: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(AppError::Validation(_))));
    }
}
