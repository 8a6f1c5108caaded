//! Storage backends. Exactly one is compiled in, selected by feature.

#[cfg(feature = "inmemory")]
mod inmemory;
#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
#[cfg(feature = "postgres")]
pub use postgres::{PgContext, PostgresForecastRepository};
