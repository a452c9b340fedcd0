//! Batch processor implementation.

use std::time::{Duration, Instant};

use crate::apply::{mutate, Outcome, UnknownPolicy};
use crate::error::MutSeqError;
use crate::record::MutationRecord;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Whether to continue processing on per-record errors.
    pub continue_on_error: bool,
    /// Callback frequency (call progress callback every N items).
    pub progress_interval: usize,
    /// Policy for descriptors that match no known mutation kind.
    pub unknown_policy: UnknownPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            progress_interval: 100,
            unknown_policy: UnknownPolicy::PassThrough,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether to continue on errors.
    pub fn continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Set the progress callback interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Set the unknown-descriptor policy.
    pub fn unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.unknown_policy = policy;
        self
    }
}

/// Progress information for batch operations.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Total items to process.
    pub total: usize,
    /// Items processed so far.
    pub processed: usize,
    /// Records mutated so far.
    pub mutated: usize,
    /// Unrecognized descriptors passed through so far.
    pub unknown: usize,
    /// Failed records so far.
    pub errors: usize,
    /// Time elapsed since start.
    pub elapsed: Duration,
}

impl BatchProgress {
    /// Calculate completion percentage.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.processed as f64 / self.total as f64) * 100.0
        }
    }

    /// Calculate processing rate (items per second).
    ///
    /// Returns 0.0 if no time has elapsed yet, so callers can tell
    /// "no estimate" apart from a real rate.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }

    /// Estimate remaining time based on current rate.
    pub fn estimated_remaining(&self) -> Option<Duration> {
        let rate = self.items_per_second();
        if rate == 0.0 {
            return None;
        }
        let remaining_items = self.total.saturating_sub(self.processed);
        Some(Duration::from_secs_f64(remaining_items as f64 / rate))
    }
}

/// A record with its resulting sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRecord {
    /// Record identifier from the input row.
    pub id: String,
    /// The raw descriptor that was applied.
    pub descriptor: String,
    /// Resulting sequence (the unchanged reference for pass-through).
    pub sequence: String,
    /// False when the descriptor was unrecognized and passed through.
    pub recognized: bool,
}

/// Result of a single record in a batch operation.
#[derive(Debug, Clone)]
pub enum ItemResult {
    /// The record was processed (mutated or passed through).
    Applied(AppliedRecord),
    /// The record failed.
    Failed {
        /// Record identifier from the input row.
        id: String,
        /// The descriptor that failed.
        descriptor: String,
        /// Error that occurred.
        error: MutSeqError,
    },
}

impl ItemResult {
    /// Check if this record was applied.
    pub fn is_applied(&self) -> bool {
        matches!(self, ItemResult::Applied(_))
    }

    /// Check if this record failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, ItemResult::Failed { .. })
    }

    /// Get the applied record if present.
    pub fn applied(self) -> Option<AppliedRecord> {
        match self {
            ItemResult::Applied(r) => Some(r),
            ItemResult::Failed { .. } => None,
        }
    }

    /// Get the error if present.
    pub fn error(&self) -> Option<&MutSeqError> {
        match self {
            ItemResult::Applied(_) => None,
            ItemResult::Failed { error, .. } => Some(error),
        }
    }
}

/// Result of a batch operation.
#[derive(Debug)]
pub struct BatchResult {
    /// Individual results for each record, in input order.
    pub results: Vec<ItemResult>,
    /// Total processing time.
    pub duration: Duration,
}

impl BatchResult {
    /// Create a new batch result.
    pub fn new(results: Vec<ItemResult>, duration: Duration) -> Self {
        Self { results, duration }
    }

    /// Get the total number of records processed.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get the number of records that were mutated.
    pub fn mutated_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, ItemResult::Applied(a) if a.recognized))
            .count()
    }

    /// Get the number of unrecognized descriptors passed through.
    pub fn unknown_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r, ItemResult::Applied(a) if !a.recognized))
            .count()
    }

    /// Get the number of failed records.
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// Calculate the share of records that did not fail, as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            100.0
        } else {
            let ok = self.results.len() - self.error_count();
            (ok as f64 / self.results.len() as f64) * 100.0
        }
    }

    /// Calculate processing rate (records per second).
    pub fn items_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.results.len() as f64 / secs
        }
    }

    /// Get only the applied records.
    pub fn applied(self) -> Vec<AppliedRecord> {
        self.results.into_iter().filter_map(|r| r.applied()).collect()
    }

    /// Check if all records were applied.
    pub fn all_applied(&self) -> bool {
        self.results.iter().all(|r| r.is_applied())
    }

    /// Check if any records failed.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|r| r.is_failed())
    }
}

/// Batch processor for mutation records.
///
/// Applies each record's descriptor to its reference sequence, isolating
/// per-record failures and counting unrecognized descriptors.
#[derive(Debug, Default)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new batch processor with configuration.
    pub fn with_config(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Apply all records.
    pub fn apply_records(&self, records: &[MutationRecord]) -> BatchResult {
        self.apply_records_with_progress(records, |_| {})
    }

    /// Apply all records with a progress callback.
    ///
    /// The callback is invoked every `progress_interval` records and once at
    /// the end.
    pub fn apply_records_with_progress<F>(
        &self,
        records: &[MutationRecord],
        mut progress_fn: F,
    ) -> BatchResult
    where
        F: FnMut(BatchProgress),
    {
        let start = Instant::now();
        let total = records.len();
        let mut results = Vec::with_capacity(total);
        let mut mutated = 0;
        let mut unknown = 0;
        let mut errors = 0;

        for (i, record) in records.iter().enumerate() {
            match mutate(&record.descriptor, &record.sequence, self.config.unknown_policy) {
                Ok(Outcome::Mutated(sequence)) => {
                    mutated += 1;
                    results.push(ItemResult::Applied(AppliedRecord {
                        id: record.id.clone(),
                        descriptor: record.descriptor.clone(),
                        sequence,
                        recognized: true,
                    }));
                }
                Ok(Outcome::Unrecognized) => {
                    unknown += 1;
                    results.push(ItemResult::Applied(AppliedRecord {
                        id: record.id.clone(),
                        descriptor: record.descriptor.clone(),
                        sequence: record.sequence.clone(),
                        recognized: false,
                    }));
                }
                Err(error) => {
                    errors += 1;
                    results.push(ItemResult::Failed {
                        id: record.id.clone(),
                        descriptor: record.descriptor.clone(),
                        error,
                    });
                    if !self.config.continue_on_error {
                        progress_fn(BatchProgress {
                            total,
                            processed: i + 1,
                            mutated,
                            unknown,
                            errors,
                            elapsed: start.elapsed(),
                        });
                        break;
                    }
                }
            }

            // Progress callback
            if (i + 1) % self.config.progress_interval == 0 || i + 1 == total {
                progress_fn(BatchProgress {
                    total,
                    processed: i + 1,
                    mutated,
                    unknown,
                    errors,
                    elapsed: start.elapsed(),
                });
            }
        }

        BatchResult::new(results, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<MutationRecord> {
        vec![
            MutationRecord::new("r1", "c.3del", "ABCDEFG"),
            MutationRecord::new("r2", "c.3C>X", "ABCDEFG"),
            MutationRecord::new("r3", "c.3_4insXYZ", "ABCDEFG"),
        ]
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.continue_on_error);
        assert_eq!(config.progress_interval, 100);
        assert_eq!(config.unknown_policy, UnknownPolicy::PassThrough);
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new()
            .continue_on_error(false)
            .progress_interval(50)
            .unknown_policy(UnknownPolicy::Reject);

        assert!(!config.continue_on_error);
        assert_eq!(config.progress_interval, 50);
        assert_eq!(config.unknown_policy, UnknownPolicy::Reject);
    }

    #[test]
    fn test_batch_progress_percent() {
        let progress = BatchProgress {
            total: 100,
            processed: 50,
            mutated: 40,
            unknown: 5,
            errors: 5,
            elapsed: Duration::from_secs(1),
        };
        assert!((progress.percent() - 50.0).abs() < 0.01);
        assert!((progress.items_per_second() - 50.0).abs() < 0.01);
        let remaining = progress.estimated_remaining().unwrap();
        assert!((remaining.as_secs_f64() - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_apply_records() {
        let result = BatchProcessor::new().apply_records(&records());
        assert_eq!(result.total(), 3);
        assert_eq!(result.mutated_count(), 3);
        assert_eq!(result.unknown_count(), 0);
        assert_eq!(result.error_count(), 0);
        assert!(result.all_applied());

        let applied = result.applied();
        assert_eq!(applied[0].sequence, "ABDEFG");
        assert_eq!(applied[1].sequence, "ABXDEFG");
        assert_eq!(applied[2].sequence, "ABCXYZDEFG");
    }

    #[test]
    fn test_unknown_descriptor_passes_through_and_is_counted() {
        let mut recs = records();
        recs.push(MutationRecord::new("r4", "c.3mystery", "ABCDEFG"));

        let result = BatchProcessor::new().apply_records(&recs);
        assert_eq!(result.total(), 4);
        assert_eq!(result.mutated_count(), 3);
        assert_eq!(result.unknown_count(), 1);
        assert_eq!(result.error_count(), 0);

        let applied = result.applied();
        assert_eq!(applied[3].sequence, "ABCDEFG");
        assert!(!applied[3].recognized);
    }

    #[test]
    fn test_failed_record_does_not_abort_batch() {
        let recs = vec![
            MutationRecord::new("r1", "c.99del", "ABCDEFG"),
            MutationRecord::new("r2", "c.3del", "ABCDEFG"),
        ];

        let result = BatchProcessor::new().apply_records(&recs);
        assert_eq!(result.total(), 2);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.mutated_count(), 1);
        assert!(result.has_errors());
        assert!((result.success_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_stop_on_first_error() {
        let recs = vec![
            MutationRecord::new("r1", "c.99del", "ABCDEFG"),
            MutationRecord::new("r2", "c.3del", "ABCDEFG"),
        ];

        let processor =
            BatchProcessor::with_config(BatchConfig::new().continue_on_error(false));
        let result = processor.apply_records(&recs);
        assert_eq!(result.total(), 1);
        assert!(result.has_errors());
    }

    #[test]
    fn test_reject_policy_fails_unknown_records() {
        let recs = vec![MutationRecord::new("r1", "c.3mystery", "ABCDEFG")];
        let processor =
            BatchProcessor::with_config(BatchConfig::new().unknown_policy(UnknownPolicy::Reject));
        let result = processor.apply_records(&recs);
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.unknown_count(), 0);
    }

    #[test]
    fn test_progress_callback_invoked() {
        let processor =
            BatchProcessor::with_config(BatchConfig::new().progress_interval(1));
        let mut seen = Vec::new();
        let result = processor.apply_records_with_progress(&records(), |p| {
            seen.push(p.processed);
        });
        assert_eq!(result.total(), 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchProcessor::new().apply_records(&[]);
        assert_eq!(result.total(), 0);
        assert!(result.all_applied());
        assert!((result.success_rate() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_item_result_accessors() {
        let ok = ItemResult::Applied(AppliedRecord {
            id: "r1".into(),
            descriptor: "c.3del".into(),
            sequence: "ABDEFG".into(),
            recognized: true,
        });
        assert!(ok.is_applied());
        assert!(ok.error().is_none());

        let failed = ItemResult::Failed {
            id: "r2".into(),
            descriptor: "c.99del".into(),
            error: MutSeqError::PositionOutOfBounds { pos: 99, len: 7 },
        };
        assert!(failed.is_failed());
        assert!(failed.error().is_some());
    }
}
