//! Batch pipeline: resolve, extract, validate, persist.
//!
//! Rows are processed sequentially in input order; each row reaches exactly
//! one terminal state before the next is attempted. Per-row failures
//! (no candidate, empty or incomplete extraction, insert conflict or
//! failure) skip that row and continue. A [`GeocodeError`] aborts the whole
//! batch: it signals a bad credential or exhausted quota that would recur
//! for every remaining row, so rows after it are never attempted.

use log::{debug, error, warn};

use crate::error_handling::GeocodeError;
use crate::geocode::{extract_address, is_complete, ReverseGeocode};
use crate::models::CoordinateRecord;
use crate::storage::{SaveOutcome, StoreRecords};

/// Terminal state of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Coordinate and address both inserted.
    Persisted,
    /// The resolver returned no candidate for the coordinate.
    SkippedNotFound,
    /// Extraction recognized no component of the candidate.
    SkippedEmptyAddress,
    /// The extracted address was missing at least one required field.
    SkippedIncomplete,
    /// An insert hit a uniqueness constraint.
    SkippedConflict,
    /// An insert failed for any other reason.
    SkippedStoreFailure,
}

/// Per-terminal-state row counts for one batch run, plus whether the run
/// was aborted by an API failure.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Rows fully persisted.
    pub persisted: usize,
    /// Rows skipped because no candidate was returned.
    pub not_found: usize,
    /// Rows skipped because extraction produced nothing.
    pub empty_address: usize,
    /// Rows skipped by the completeness check.
    pub incomplete: usize,
    /// Rows skipped on an insert conflict.
    pub conflicts: usize,
    /// Rows skipped on any other insert failure.
    pub store_failures: usize,
    /// Set when the batch stopped early on an API failure. Rows after the
    /// failing one were never attempted and appear in no count.
    pub aborted: Option<GeocodeError>,
}

impl BatchSummary {
    /// Rows that reached a terminal state.
    pub fn attempted(&self) -> usize {
        self.persisted
            + self.not_found
            + self.empty_address
            + self.incomplete
            + self.conflicts
            + self.store_failures
    }

    /// Rows that reached a terminal state other than `Persisted`.
    pub fn skipped(&self) -> usize {
        self.attempted() - self.persisted
    }

    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Persisted => self.persisted += 1,
            RowOutcome::SkippedNotFound => self.not_found += 1,
            RowOutcome::SkippedEmptyAddress => self.empty_address += 1,
            RowOutcome::SkippedIncomplete => self.incomplete += 1,
            RowOutcome::SkippedConflict => self.conflicts += 1,
            RowOutcome::SkippedStoreFailure => self.store_failures += 1,
        }
    }
}

/// Drives each coordinate row through resolve, extract, validate, persist.
pub struct BatchPipeline<R, S> {
    resolver: R,
    store: S,
}

impl<R, S> BatchPipeline<R, S>
where
    R: ReverseGeocode,
    S: StoreRecords,
{
    /// Creates a pipeline over the given resolver and store.
    pub fn new(resolver: R, store: S) -> BatchPipeline<R, S> {
        BatchPipeline { resolver, store }
    }

    /// Processes every row, in order, to a terminal state.
    ///
    /// Returns the per-state counts. When a resolver call fails the summary
    /// carries the error in `aborted` and covers only the rows attempted
    /// before the failure.
    pub async fn run(&self, rows: &[CoordinateRecord]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for row in rows {
            match self.process_row(row).await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!(
                        "Reverse geocoding failed for ({}, {}), aborting the batch: {e}",
                        row.latitude, row.longitude
                    );
                    summary.aborted = Some(e);
                    break;
                }
            }
        }
        summary
    }

    async fn process_row(&self, row: &CoordinateRecord) -> Result<RowOutcome, GeocodeError> {
        let components = match self.resolver.resolve(row.latitude, row.longitude).await? {
            Some(components) => components,
            None => {
                warn!(
                    "Address couldn't be resolved for ({}, {}): reverse geocode returned no candidates",
                    row.latitude, row.longitude
                );
                return Ok(RowOutcome::SkippedNotFound);
            }
        };

        let mut address = extract_address(&components);
        if address.is_empty() {
            debug!(
                "No recognized address components for ({}, {})",
                row.latitude, row.longitude
            );
            return Ok(RowOutcome::SkippedEmptyAddress);
        }

        address.latitude = Some(row.latitude);
        address.longitude = Some(row.longitude);
        if !is_complete(&address) {
            debug!(
                "Incomplete address for ({}, {}): {address:?}",
                row.latitude, row.longitude
            );
            return Ok(RowOutcome::SkippedIncomplete);
        }

        Ok(match self.store.save(row, &address).await {
            SaveOutcome::Saved => RowOutcome::Persisted,
            SaveOutcome::Conflict => RowOutcome::SkippedConflict,
            SaveOutcome::StoreFailure => RowOutcome::SkippedStoreFailure,
        })
    }
}
