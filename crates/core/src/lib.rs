//! Core library for the forecast API.
//!
//! This crate holds everything the HTTP server builds on top of:
//! - `forecast`: the domain model for the single CRUD resource.
//! - `storage`: repository capability traits and the repository error
//!   taxonomy, plus its HTTP status mapping.
//! - `registry`: the two-phase service registry (mutable during startup,
//!   read-only afterwards) with per-request scopes.

pub mod forecast;
pub mod registry;
pub mod storage;

pub use forecast::Forecast;
