pub mod algorithm;
pub mod control;
pub mod counter;
pub mod engine;
pub mod progress;

pub use algorithm::{SortAlgorithm, estimated_expensive, expected_duration_hint};
pub use control::RunControl;
pub use counter::OperationCounter;
pub use engine::SortEngine;
pub use progress::{NoProgress, ProgressSink};
