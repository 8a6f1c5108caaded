//! Domain model for the forecast resource.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily weather forecast record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub id: Uuid,
    /// The day this forecast is for.
    pub date: NaiveDate,
    /// Forecast temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Free-form summary ("Chilly", "Scorching", ...).
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Forecast {
    /// Create a new forecast with a generated UUID and current timestamps.
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            date,
            temperature_c,
            summary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the update timestamp after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
