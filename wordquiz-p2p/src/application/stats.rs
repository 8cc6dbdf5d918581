use crate::application::{DispatchError, Routed};
use std::time::Duration;

/// Outcome of one drain-and-route tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Messages taken from the buffer
    pub drained: usize,
    /// Messages that reached a consumer
    pub dispatched: usize,
    /// Self-originated broadcasts that were not re-applied
    pub skipped_self: usize,
    /// Messages without a route
    pub dropped_unknown: usize,
    /// Messages whose payload had the wrong type
    pub payload_mismatches: usize,
    /// Consumer errors and panics
    pub failures: usize,
    /// Wall time spent routing the batch
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.drained == 0
    }

    pub(crate) fn record(&mut self, outcome: &Result<Routed, DispatchError>) {
        match outcome {
            Ok(Routed::SkippedSelfOrigin) => self.skipped_self += 1,
            Ok(_) => self.dispatched += 1,
            Err(DispatchError::UnknownEventKind(_)) => self.dropped_unknown += 1,
            Err(DispatchError::PayloadTypeMismatch { .. }) => self.payload_mismatches += 1,
            Err(DispatchError::Consumer(_)) | Err(DispatchError::Panicked(_)) => {
                self.failures += 1
            }
        }
    }
}

/// Totals since the dispatcher was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub batches: u64,
    pub dispatched: u64,
    pub skipped_self: u64,
    pub dropped_unknown: u64,
    pub payload_mismatches: u64,
    pub failures: u64,
}

impl DispatchStats {
    /// Fold a non-empty batch into the totals
    pub fn absorb(&mut self, report: &BatchReport) {
        if report.is_empty() {
            return;
        }
        self.batches += 1;
        self.dispatched += report.dispatched as u64;
        self.skipped_self += report.skipped_self as u64;
        self.dropped_unknown += report.dropped_unknown as u64;
        self.payload_mismatches += report.payload_mismatches as u64;
        self.failures += report.failures as u64;
    }

    pub fn total_seen(&self) -> u64 {
        self.dispatched
            + self.skipped_self
            + self.dropped_unknown
            + self.payload_mismatches
            + self.failures
    }
}
