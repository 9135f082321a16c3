//! The `Reading` value and the comparisons defined over it.
//!
//! `Reading` is plain data. Ordering and identity live in free functions so
//! callers pick the comparison they need explicitly:
//!
//! - [`cmp_natural`]: country, state, city, year, month, day.
//! - [`cmp_location`]: country, state, city only (used to group runs).
//! - [`same_observation`]: identity over the six fields natural ordering uses;
//!   region and temperature are ignored.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

/// Temperature recorded when the source had no measurement for the day.
pub const MISSING_TEMPERATURE: f64 = -99.0;

/// One daily observation for a city.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// Continental region, e.g. "North America".
    pub region: String,
    /// Country name.
    pub country: String,
    /// State or province; empty when the country has none in the source.
    pub state: String,
    /// City name.
    pub city: String,
    /// Month of year, 1-12 in well-formed data.
    pub month: u32,
    /// Day of month, 1-31 in well-formed data.
    pub day: u32,
    /// Calendar year.
    pub year: i32,
    /// Average temperature in degrees Fahrenheit, or [`MISSING_TEMPERATURE`].
    pub avg_temp: f64,
}

impl Reading {
    /// Build a reading from its eight fields in source column order.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: impl Into<String>,
        country: impl Into<String>,
        state: impl Into<String>,
        city: impl Into<String>,
        month: u32,
        day: u32,
        year: i32,
        avg_temp: f64,
    ) -> Self {
        Self {
            region: region.into(),
            country: country.into(),
            state: state.into(),
            city: city.into(),
            month,
            day,
            year,
            avg_temp,
        }
    }

    /// The country/state/city key this reading groups under.
    pub fn location(&self) -> LocationKey<'_> {
        LocationKey {
            country: &self.country,
            state: &self.state,
            city: &self.city,
        }
    }

    /// False when the temperature is the missing-data sentinel.
    pub fn has_temperature(&self) -> bool {
        self.avg_temp != MISSING_TEMPERATURE
    }

    /// Calendar date of the reading, if month/day/year form a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Borrowed country/state/city probe used for grouping and search.
///
/// Field order matters: the derived `Ord` compares country, then state,
/// then city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationKey<'a> {
    /// Country name.
    pub country: &'a str,
    /// State name, possibly empty.
    pub state: &'a str,
    /// City name.
    pub city: &'a str,
}

impl<'a> LocationKey<'a> {
    /// Build a probe key from its parts.
    pub fn new(country: &'a str, state: &'a str, city: &'a str) -> Self {
        Self {
            country,
            state,
            city,
        }
    }
}

/// Natural ordering: country, state, city, year, month, day.
pub fn cmp_natural(a: &Reading, b: &Reading) -> Ordering {
    cmp_location(a, b)
        .then_with(|| a.year.cmp(&b.year))
        .then_with(|| a.month.cmp(&b.month))
        .then_with(|| a.day.cmp(&b.day))
}

/// Location-only ordering: country, state, city.
pub fn cmp_location(a: &Reading, b: &Reading) -> Ordering {
    a.location().cmp(&b.location())
}

/// Identity: same place and same day. Region and temperature are ignored.
pub fn same_observation(a: &Reading, b: &Reading) -> bool {
    a.country == b.country
        && a.state == b.state
        && a.city == b.city
        && a.year == b.year
        && a.month == b.month
        && a.day == b.day
}
