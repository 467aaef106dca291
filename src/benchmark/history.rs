use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::reporting::format_log_entry;
use super::types::RunResult;

/// Append-only list of finished runs, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ResultHistory {
    results: Vec<RunResult>,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: RunResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn last(&self) -> Option<&RunResult> {
        self.results.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter()
    }

    pub fn results(&self) -> &[RunResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a ResultHistory {
    type Item = &'a RunResult;
    type IntoIter = std::slice::Iter<'a, RunResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Text log that gets one block appended per run.
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, result: &RunResult) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(format_log_entry(result, timestamp).as_bytes())?;
        Ok(())
    }
}
