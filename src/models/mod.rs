//! Data models for the tank registry.
//!
//! Stored documents, the payloads that create or patch them, and the rules a
//! payload must satisfy before it is allowed near the store.

mod profile;
mod tank;

pub use profile::*;
pub use tank::*;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use uuid::Uuid;

use crate::errors::AppError;

/// Generate a fresh store identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parse an identifier taken from a request path into its stored text form.
///
/// Returns `None` for anything that is not a UUID, so callers can answer with
/// a 404 instead of querying the store.
pub fn parse_id(raw: &str) -> Option<String> {
    Uuid::parse_str(raw.trim()).ok().map(|id| id.to_string())
}

/// `Last_Updated` default for newly constructed documents.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// A coordinate as it may arrive on the wire: a JSON number or numeric text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Coordinate::Number(value) => Ok(value),
            Coordinate::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid number: {:?}", text))),
        }
    }
}

/// Accept `18.5` or `"18.5"` for a float field.
fn number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Coordinate::deserialize(deserializer)?.into_f64()
}

/// Optional variant of [`number_or_text`]; `null` reads as absent.
fn optional_number_or_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<Coordinate>::deserialize(deserializer)?
        .map(Coordinate::into_f64)
        .transpose()
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::Validation(format!("{} must be a finite number", field)));
    }
    Ok(())
}
