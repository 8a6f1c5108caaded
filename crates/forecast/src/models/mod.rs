//! Request and response payloads for the HTTP surface.

mod forecast;

pub use forecast::{CreateForecast, ForecastDto, UpdateForecast};
