use super::counter::OperationCounter;

/// Receives progress snapshots from a running sort.
///
/// Called synchronously from the sort's own sampling points, so
/// implementations should return quickly.
pub trait ProgressSink {
    fn update(&self, label: &str, counter: &OperationCounter);

    /// Called once after the counter has been forced to 100%.
    fn finish(&self, label: &str, counter: &OperationCounter);
}

/// Sink that drops every update.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _label: &str, _counter: &OperationCounter) {}

    fn finish(&self, _label: &str, _counter: &OperationCounter) {}
}
