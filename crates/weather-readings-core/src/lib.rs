//! Core engine for querying daily city temperature readings.
//!
//! This crate provides the pieces behind the `weather` CLI:
//!
//! - A plain [`Reading`] value plus the free comparator functions used to
//!   order, group and identify readings (`reading` module).
//! - A [`RecordStore`] that owns the readings in source order and sorts
//!   itself at most once, lazily, the first time a location lookup misses
//!   (`store` module).
//! - A [`WeatherQueryEngine`] exposing indexed and ranged retrieval, the
//!   per-city run lookup and the least-squares temperature trend
//!   (`engine` and `regression` modules).
//! - CSV ingestion into readings backed by `arrow-csv` (`ingest` module).
//!
//! The dataset is loaded fully into memory before any query is served and is
//! never mutated afterwards apart from the one-time sort.
#![deny(missing_docs)]
pub mod engine;
pub mod error;
pub mod ingest;
pub mod reading;
pub mod regression;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util;

pub use engine::{CityListStats, WeatherQueryEngine};
pub use error::{IngestError, QueryError};
pub use reading::{LocationKey, MISSING_TEMPERATURE, Reading};
pub use store::{RecordStore, Snapshot, StoreOrder};
