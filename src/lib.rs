// Sorting Algorithm Benchmark Library

/// Supplies records to a benchmark run.
///
/// Implementations own file access, sanitization and validation; the sort
/// core only ever sees finished [`Record`]s.
pub trait RecordSource {
    /// Number of records available.
    fn size(&self) -> usize;

    /// Copies of the first `count` records (fewer if the source is smaller).
    fn load(&self, count: usize) -> Vec<Record>;

    fn description(&self) -> String;
}

// Input implementation
pub struct InMemDataset {
    pub records: Vec<Record>,
}

impl InMemDataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemDataset {
    fn size(&self) -> usize {
        self.records.len()
    }

    fn load(&self, count: usize) -> Vec<Record> {
        self.records[..count.min(self.records.len())].to_vec()
    }

    fn description(&self) -> String {
        format!("In-memory dataset ({} records)", self.records.len())
    }
}

// Implementations
pub mod benchmark;
pub mod dataset;
pub mod error;
pub mod record;
pub mod sort;

// Export the main types
pub use benchmark::{BenchmarkConfig, BenchmarkRunner, ResultHistory, RunResult};
pub use dataset::CsvDataset;
pub use error::{BenchmarkError, DatasetError};
pub use record::{Record, SortKey};
pub use sort::{
    OperationCounter, ProgressSink, RunControl, SortAlgorithm, SortEngine, estimated_expensive,
};
