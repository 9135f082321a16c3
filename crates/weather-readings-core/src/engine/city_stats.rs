//! Per-city run lookup.
//!
//! A city's readings form a contiguous run once the store is in natural
//! order. The lookup:
//! - binary-searches the current order on country/state/city, assuming it is
//!   already sorted;
//! - on a miss, sorts the store once (permanently) and searches again;
//! - on a hit, walks back to the first reading of the run, then forward to
//!   count the run and collect one year per reading.
//!
//! Searching an unsorted order can still land on a match; the run is then
//! delimited in that order as-is, without sorting.

use std::ops::Range;

use log::debug;
use serde::Serialize;
use snafu::ensure;

use crate::engine::WeatherQueryEngine;
use crate::error::{InvalidArgumentSnafu, QueryResult};
use crate::reading::{LocationKey, Reading};

/// Position, size and years of one city's run of readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityListStats {
    /// Index of the run's first reading in the store's current order.
    pub starting_index: usize,
    /// Number of readings in the run.
    pub count: usize,
    /// Year of every reading in the run, ascending. Not deduplicated.
    pub years: Vec<i32>,
}

impl CityListStats {
    /// Index range of the run in the store's current order.
    pub fn range(&self) -> Range<usize> {
        self.starting_index..self.starting_index + self.count
    }

    /// Earliest and latest year in the run.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }
}

impl WeatherQueryEngine {
    /// Locate the run of readings for `country`/`state`/`city`.
    ///
    /// `country` and `city` must be non-empty; `state` may be empty for
    /// countries without states. Returns `Ok(None)` when no reading matches
    /// even after the store has been sorted.
    ///
    /// The first miss sorts the store, which changes the indices
    /// [`WeatherQueryEngine::reading`] and friends resolve against.
    pub fn city_stats(
        &self,
        country: &str,
        state: &str,
        city: &str,
    ) -> QueryResult<Option<CityListStats>> {
        ensure!(
            !country.is_empty(),
            InvalidArgumentSnafu {
                argument: "country",
                reason: "must not be empty",
            }
        );
        ensure!(
            !city.is_empty(),
            InvalidArgumentSnafu {
                argument: "city",
                reason: "must not be empty",
            }
        );

        let key = LocationKey::new(country, state, city);

        // The snapshot must be released before sorting, or the sort has to
        // copy the records it shares.
        {
            let snapshot = self.store.snapshot();
            if let Some(stats) = locate_run(&snapshot, &key) {
                return Ok(Some(stats));
            }
        }

        debug!("lookup for {key:?} missed in current order");
        self.store.ensure_sorted();

        let sorted = self.store.snapshot();
        let stats = locate_run(&sorted, &key);
        if stats.is_none() {
            debug!("no readings for {key:?}");
        }
        Ok(stats)
    }
}

fn locate_run(records: &[Reading], key: &LocationKey<'_>) -> Option<CityListStats> {
    let hit = records
        .binary_search_by(|probe| probe.location().cmp(key))
        .ok()?;

    let mut start = hit;
    while start > 0 && records[start - 1].location() == *key {
        start -= 1;
    }

    let mut years: Vec<i32> = records[start..]
        .iter()
        .take_while(|r| r.location() == *key)
        .map(|r| r.year)
        .collect();
    let count = years.len();
    years.sort_unstable();

    Some(CityListStats {
        starting_index: start,
        count,
        years,
    })
}
