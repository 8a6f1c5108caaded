use chrono::{DateTime, NaiveDate, Utc};
use forecast_core::Forecast;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload for creating a forecast.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    #[serde(default)]
    pub summary: Option<String>,
}

impl CreateForecast {
    /// Build a fresh domain entity, assigning identity and timestamps.
    pub fn into_forecast(self) -> Forecast {
        Forecast::new(self.date, self.temperature_c, self.summary)
    }
}

/// Payload for updating a forecast. Absent fields keep their value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateForecast {
    pub date: Option<NaiveDate>,
    pub temperature_c: Option<i32>,
    pub summary: Option<String>,
}

impl UpdateForecast {
    /// Apply the present fields to an existing forecast and bump its
    /// modification timestamp.
    pub fn apply_to(&self, forecast: &mut Forecast) {
        if let Some(date) = self.date {
            forecast.date = date;
        }
        if let Some(temperature_c) = self.temperature_c {
            forecast.temperature_c = temperature_c;
        }
        if let Some(summary) = &self.summary {
            forecast.summary = Some(summary.clone());
        }
        forecast.touch();
    }
}

/// Outbound representation of a forecast.
///
/// Carries the derived Fahrenheit reading alongside the stored Celsius
/// value so clients never recompute the conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastDto {
    pub id: Uuid,
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: f64,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Forecast> for ForecastDto {
    fn from(forecast: &Forecast) -> Self {
        Self {
            id: forecast.id,
            date: forecast.date,
            temperature_c: forecast.temperature_c,
            temperature_f: f64::from(forecast.temperature_c) * 9.0 / 5.0 + 32.0,
            summary: forecast.summary.clone(),
            created_at: forecast.created_at,
            updated_at: forecast.updated_at,
        }
    }
}
