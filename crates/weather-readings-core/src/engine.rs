//! Query surface over a [`RecordStore`].
//!
//! `WeatherQueryEngine` is what callers talk to: indexed and windowed
//! retrieval, month/day filtering, the per-city run lookup
//! ([`WeatherQueryEngine::city_stats`]) and the temperature trend slope.
//! All operations are synchronous reads except that a missed city lookup
//! may sort the underlying store once.

mod city_stats;

use std::path::Path;

use log::info;
use snafu::ensure;

use crate::error::{IngestResult, InvalidArgumentSnafu, QueryResult};
use crate::reading::Reading;
use crate::regression;
use crate::store::{RecordStore, Snapshot, checked_window};

pub use city_stats::CityListStats;

/// Read-only query engine over a readings dataset.
#[derive(Debug)]
pub struct WeatherQueryEngine {
    store: RecordStore,
}

impl WeatherQueryEngine {
    /// Wrap an existing store.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Load readings from a CSV file and wrap them in an engine.
    pub fn open(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let store = RecordStore::from_csv_path(path)?;
        info!("loaded {} readings from {}", store.len(), path.display());
        Ok(Self::new(store))
    }

    /// The underlying store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Total number of readings.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Reading at `index` in the current order.
    pub fn reading(&self, index: i64) -> QueryResult<Reading> {
        self.store.get(index)
    }

    /// The `count` readings starting at `index` in the current order.
    pub fn readings(&self, index: i64, count: i64) -> QueryResult<Vec<Reading>> {
        self.store.get_range(index, count)
    }

    /// Readings within `[index, index + count)` recorded on `month`/`day`,
    /// in their current relative order.
    ///
    /// The window is validated first, then `month` (1-12) and `day` (1-31).
    /// Usually returns far fewer than `count` readings: one per year for a
    /// single city.
    pub fn readings_on_day(
        &self,
        index: i64,
        count: i64,
        month: u32,
        day: u32,
    ) -> QueryResult<Vec<Reading>> {
        let snapshot = self.store.snapshot();
        let range = checked_window(index, count, snapshot.len())?;
        ensure!(
            (1..=12).contains(&month),
            InvalidArgumentSnafu {
                argument: "month",
                reason: format!("{month} is not in 1..=12"),
            }
        );
        ensure!(
            (1..=31).contains(&day),
            InvalidArgumentSnafu {
                argument: "day",
                reason: format!("{day} is not in 1..=31"),
            }
        );

        Ok(snapshot[range]
            .iter()
            .filter(|r| r.month == month && r.day == day)
            .cloned()
            .collect())
    }

    /// A stable view of every reading in the current order.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Slope of the year/temperature best-fit line over `readings`.
    ///
    /// Readings carrying [`crate::MISSING_TEMPERATURE`] are skipped. Fails
    /// with [`crate::QueryError::InvalidArgument`] on `readings` when fewer
    /// than two remain after skipping.
    /// A positive slope means temperatures are rising over the years.
    pub fn regression_slope(&self, readings: &[Reading]) -> QueryResult<f64> {
        let (years, temps): (Vec<i32>, Vec<f64>) = readings
            .iter()
            .filter(|r| r.has_temperature())
            .map(|r| (r.year, r.avg_temp))
            .unzip();

        ensure!(
            years.len() >= 2,
            InvalidArgumentSnafu {
                argument: "readings",
                reason: format!(
                    "need at least 2 readings with a temperature, got {} of {}",
                    years.len(),
                    readings.len()
                ),
            }
        );

        regression::slope(&years, &temps)
    }

    /// Least-squares slope over explicit samples; see [`regression::slope`].
    pub fn slope(&self, x: &[i32], y: &[f64]) -> QueryResult<f64> {
        regression::slope(x, y)
    }
}

impl From<RecordStore> for WeatherQueryEngine {
    fn from(store: RecordStore) -> Self {
        Self::new(store)
    }
}
