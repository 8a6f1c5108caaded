mod context;
mod error;
mod repository;
mod schema;

pub use context::PgContext;
pub use repository::PostgresForecastRepository;
