pub mod docs;
pub mod error;
pub mod forecasts;
pub mod health;

pub use error::AppError;
