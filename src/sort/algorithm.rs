use std::fmt;
use std::str::FromStr;

/// Record counts above this make the quadratic algorithms slow enough to
/// warn about before running.
pub const EXPENSIVE_RECORD_THRESHOLD: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortAlgorithm {
    Bubble,
    Insertion,
    Merge,
}

impl SortAlgorithm {
    /// Every algorithm, in the order a comparison benchmark runs them.
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
        }
    }

    pub fn complexity(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Insertion => "O(n²)",
            SortAlgorithm::Merge => "O(n log n)",
        }
    }

    pub fn is_quadratic(&self) -> bool {
        matches!(self, SortAlgorithm::Bubble | SortAlgorithm::Insertion)
    }

    /// Operation estimate used to scale the progress percentage.
    ///
    /// Bubble uses the worst-case pair count, insertion half of it (average
    /// case), merge `floor(n * log2(n))`. None of these bound the real work.
    pub fn estimated_operations(&self, n: usize) -> u64 {
        if n <= 1 {
            return 0;
        }
        let n64 = n as u64;
        match self {
            SortAlgorithm::Bubble => n64 * (n64 - 1) / 2,
            SortAlgorithm::Insertion => n64 * (n64 - 1) / 4,
            SortAlgorithm::Merge => (n as f64 * (n as f64).log2()).floor() as u64,
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" | "1" => Ok(SortAlgorithm::Bubble),
            "insertion" | "2" => Ok(SortAlgorithm::Insertion),
            "merge" | "3" => Ok(SortAlgorithm::Merge),
            other => Err(format!(
                "Unknown algorithm '{}' (expected bubble, insertion or merge)",
                other
            )),
        }
    }
}

/// True when a quadratic algorithm is asked to sort more than
/// `EXPENSIVE_RECORD_THRESHOLD` records. Advisory only.
pub fn estimated_expensive(algorithm: SortAlgorithm, record_count: usize) -> bool {
    algorithm.is_quadratic() && record_count > EXPENSIVE_RECORD_THRESHOLD
}

/// Rough wall-clock expectation for a quadratic run, shown next to the
/// expensive-run warning.
pub fn expected_duration_hint(record_count: usize) -> &'static str {
    if record_count >= 50_000 {
        "several minutes to hours"
    } else if record_count >= 20_000 {
        "1-5 minutes"
    } else {
        "10-60 seconds"
    }
}
