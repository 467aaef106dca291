use std::path::Path;
use std::time::Instant;

use super::history::{ResultHistory, RunLog};
use super::types::{BenchmarkConfig, RunResult};
use super::verification::OutputVerifier;
use crate::dataset::CsvDataset;
use crate::error::BenchmarkError;
use crate::record::{Record, SortKey};
use crate::sort::{
    NoProgress, OperationCounter, ProgressSink, RunControl, SortAlgorithm, SortEngine,
};
use crate::RecordSource;

/// A finished run together with the records it produced.
pub struct RunOutcome {
    pub result: RunResult,
    pub records: Vec<Record>,
}

/// Drives algorithm runs over slices taken from a [`RecordSource`].
///
/// Each run gets a freshly loaded slice, a fresh [`OperationCounter`] and a
/// fresh engine. The [`RunControl`] handle is long-lived so input watchers
/// can hold on to it. It is reset once a run's outcome has been captured, so
/// a cancel issued between runs stops the next one before its first swap.
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    source: Box<dyn RecordSource>,
    control: RunControl,
    history: ResultHistory,
    progress: Option<Box<dyn ProgressSink>>,
    verifier: Option<Box<dyn OutputVerifier>>,
    run_log: Option<RunLog>,
}

impl BenchmarkRunner {
    pub fn new(config: BenchmarkConfig, source: Box<dyn RecordSource>) -> Self {
        let run_log = config.log_path.as_ref().map(RunLog::new);
        Self {
            config,
            source,
            control: RunControl::new(),
            history: ResultHistory::new(),
            progress: None,
            verifier: None,
            run_log,
        }
    }

    pub fn from_csv(
        config: BenchmarkConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self, BenchmarkError> {
        let dataset = CsvDataset::open(path)?;
        Ok(Self::new(config, Box::new(dataset)))
    }

    pub fn set_verifier(&mut self, verifier: Box<dyn OutputVerifier>) {
        self.verifier = Some(verifier);
    }

    pub fn set_progress_sink(&mut self, progress: Box<dyn ProgressSink>) {
        self.progress = Some(progress);
    }

    /// Handle for cancelling or pausing whichever run is in flight.
    pub fn control(&self) -> RunControl {
        self.control.clone()
    }

    pub fn history(&self) -> &ResultHistory {
        &self.history
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }

    pub fn run_one(
        &mut self,
        algorithm: SortAlgorithm,
        key: SortKey,
        record_count: usize,
    ) -> Result<RunResult, BenchmarkError> {
        self.run_one_with_records(algorithm, key, record_count)
            .map(|outcome| outcome.result)
    }

    /// Like [`run_one`](Self::run_one) but also hands back the sorted slice.
    pub fn run_one_with_records(
        &mut self,
        algorithm: SortAlgorithm,
        key: SortKey,
        record_count: usize,
    ) -> Result<RunOutcome, BenchmarkError> {
        let available = self.source.size();
        if record_count > available {
            return Err(BenchmarkError::InsufficientRecords {
                requested: record_count,
                available,
            });
        }

        if self.control.is_cancelled() {
            log::info!("Cancellation pending; {} will stop immediately", algorithm);
        }
        log::info!(
            "Running {} on {} records by {}",
            algorithm,
            record_count,
            key
        );

        let load_start = Instant::now();
        let mut records = self.source.load(record_count);
        let load_time = load_start.elapsed();

        let verifying = self.config.verify && self.verifier.is_some();
        if self.config.verify && self.verifier.is_none() {
            log::warn!("Verification requested but no verifier provided");
        }
        let input = if verifying { records.clone() } else { Vec::new() };

        let counter = OperationCounter::new();
        let fallback = NoProgress;
        let progress: &dyn ProgressSink = match (&self.progress, self.config.show_progress) {
            (Some(sink), true) => &**sink,
            _ => &fallback,
        };

        let sort_start = Instant::now();
        {
            let engine =
                SortEngine::new(key, &counter, self.control.clone()).with_progress(progress);
            engine.sort(algorithm, &mut records);
        }
        let sort_time = sort_start.elapsed();

        let cancelled = self.control.is_cancelled();
        // Requests that arrive after this point belong to the next run.
        self.control.reset();
        let result = RunResult {
            algorithm,
            sort_key: key,
            record_count: records.len(),
            load_time,
            sort_time,
            comparisons: counter.comparisons(),
            swaps: counter.swaps(),
            completed: !cancelled,
            cancelled,
        };

        if verifying && !cancelled {
            if let Some(verifier) = &self.verifier {
                verifier.verify(key, &input, &records)?;
                log::info!("Verified {} records", records.len());
            }
        }

        log::info!(
            "{} finished: {} comparisons, {} swaps, sort {:.3}s ({})",
            algorithm,
            result.comparisons,
            result.swaps,
            result.sort_time.as_secs_f64(),
            result.status()
        );
        self.history.push(result.clone());
        if let Some(run_log) = &self.run_log {
            if let Err(e) = run_log.append(&result) {
                log::warn!("Failed to append to {:?}: {}", run_log.path(), e);
            }
        }

        Ok(RunOutcome { result, records })
    }

    /// Runs bubble, insertion and merge sort in that order, each on its own
    /// freshly loaded slice.
    pub fn run_all(
        &mut self,
        key: SortKey,
        record_count: usize,
    ) -> Result<Vec<RunResult>, BenchmarkError> {
        let mut results = Vec::with_capacity(SortAlgorithm::ALL.len());
        for algorithm in SortAlgorithm::ALL {
            results.push(self.run_one(algorithm, key, record_count)?);
        }
        Ok(results)
    }
}
