//! Owned, fixed-after-construction storage for readings.
//!
//! Records keep source row order until the first location lookup misses;
//! the store then sorts itself once by natural ordering and stays sorted.
//! The records sit behind an `Arc` guarded by a `RwLock`: readers clone the
//! `Arc` and work on that snapshot, so a concurrent sort never exposes a
//! half-reordered sequence, and the write path re-checks the order token so
//! racing misses sort at most once.

use std::ops::{Deref, Range};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use snafu::prelude::*;

use crate::error::{IngestResult, OutOfRangeSnafu, QueryResult};
use crate::ingest;
use crate::reading::{Reading, cmp_natural};

/// Ordering state of a [`RecordStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrder {
    /// Source row order, as constructed.
    Insertion,
    /// Sorted by natural ordering. Terminal.
    Sorted,
}

#[derive(Debug)]
struct StoreState {
    records: Arc<Vec<Reading>>,
    order: StoreOrder,
}

/// The readings dataset.
#[derive(Debug)]
pub struct RecordStore {
    state: RwLock<StoreState>,
}

impl RecordStore {
    /// Take ownership of already-validated readings, keeping their order.
    pub fn new(records: Vec<Reading>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                records: Arc::new(records),
                order: StoreOrder::Insertion,
            }),
        }
    }

    /// Load a store from a readings CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> IngestResult<Self> {
        ingest::read_csv_path(path.as_ref()).map(Self::new)
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// True when the store holds no readings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current ordering state.
    pub fn order(&self) -> StoreOrder {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
    }

    /// Reading at `index` in the current order.
    pub fn get(&self, index: i64) -> QueryResult<Reading> {
        let snapshot = self.snapshot();
        let range = checked_window(index, 1, snapshot.len())?;
        Ok(snapshot[range.start].clone())
    }

    /// Copy of the `count` readings starting at `index` in the current order.
    pub fn get_range(&self, index: i64, count: i64) -> QueryResult<Vec<Reading>> {
        let snapshot = self.snapshot();
        let range = checked_window(index, count, snapshot.len())?;
        Ok(snapshot[range].to_vec())
    }

    /// A stable view of all readings in the current order.
    ///
    /// The view can be iterated any number of times and is not affected by a
    /// sort that happens after it was taken.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot {
            records: Arc::clone(&state.records),
            order: state.order,
        }
    }

    /// Sort by natural ordering unless already sorted.
    ///
    /// Sorts in place when no [`Snapshot`] is alive; otherwise the
    /// outstanding snapshots keep the old order and the store sorts a copy.
    pub(crate) fn ensure_sorted(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.order == StoreOrder::Sorted {
            debug!("readings already sorted");
            return;
        }

        debug!("sorting {} readings by natural order", state.records.len());
        Arc::make_mut(&mut state.records).sort_by(cmp_natural);
        state.order = StoreOrder::Sorted;
        debug!("readings sorted");
    }
}

impl FromIterator<Reading> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Validate an `(index, count)` window against `len` and convert it to a
/// slice range.
///
/// Fails when `index < 0`, `count < 1` or `index + count > len`.
pub(crate) fn checked_window(index: i64, count: i64, len: usize) -> QueryResult<Range<usize>> {
    let out_of_range = OutOfRangeSnafu { index, count, len };
    ensure!(index >= 0 && count >= 1, out_of_range);

    let start = usize::try_from(index).ok().context(out_of_range)?;
    let width = usize::try_from(count).ok().context(out_of_range)?;
    let end = start.checked_add(width).context(out_of_range)?;
    ensure!(end <= len, out_of_range);

    Ok(start..end)
}

/// Point-in-time view over a store's readings.
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Arc<Vec<Reading>>,
    order: StoreOrder,
}

impl Snapshot {
    /// Ordering state the store was in when the view was taken.
    pub fn order(&self) -> StoreOrder {
        self.order
    }
}

impl Deref for Snapshot {
    type Target = [Reading];

    fn deref(&self) -> &[Reading] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
