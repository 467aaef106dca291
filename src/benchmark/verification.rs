use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::BenchmarkError;
use crate::record::{Record, SortKey};

pub trait OutputVerifier {
    /// Checks `output` after a completed run. `input` is the slice as it was
    /// handed to the sort.
    fn verify(&self, key: SortKey, input: &[Record], output: &[Record])
    -> Result<(), BenchmarkError>;
}

/// Simple verifier that only checks sort order
pub struct SimpleVerifier {
    pub print_sample: bool,
}

impl SimpleVerifier {
    pub fn new() -> Self {
        Self { print_sample: true }
    }

    pub fn new_quiet() -> Self {
        Self {
            print_sample: false,
        }
    }
}

impl Default for SimpleVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputVerifier for SimpleVerifier {
    fn verify(
        &self,
        key: SortKey,
        _input: &[Record],
        output: &[Record],
    ) -> Result<(), BenchmarkError> {
        check_sorted(key, output)?;
        if self.print_sample {
            print_verified_sample(key, output);
        }
        Ok(())
    }
}

/// Checks order and that the output holds exactly the input's records.
pub struct PermutationVerifier {
    pub print_sample: bool,
}

impl PermutationVerifier {
    pub fn new() -> Self {
        Self { print_sample: true }
    }

    pub fn new_quiet() -> Self {
        Self {
            print_sample: false,
        }
    }
}

impl Default for PermutationVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputVerifier for PermutationVerifier {
    fn verify(
        &self,
        key: SortKey,
        input: &[Record],
        output: &[Record],
    ) -> Result<(), BenchmarkError> {
        check_sorted(key, output)?;
        check_permutation(input, output)?;
        if self.print_sample {
            print_verified_sample(key, output);
        }
        Ok(())
    }
}

fn print_verified_sample(key: SortKey, output: &[Record]) {
    println!("Verified {} records - all correctly sorted!", output.len());
    let head = output.len().min(5);
    println!("\nFirst {} records:", head);
    for (i, record) in output.iter().take(head).enumerate() {
        println!("  Record {}: {} = {}", i, key, record.key_string(key));
    }
    let tail_start = output.len().saturating_sub(5);
    println!("\nLast {} records:", output.len() - tail_start);
    for (i, record) in output.iter().enumerate().skip(tail_start) {
        println!("  Record {}: {} = {}", i, key, record.key_string(key));
    }
}

/// Every adjacent pair must satisfy `key(a) <= key(b)`.
pub fn check_sorted(key: SortKey, records: &[Record]) -> Result<(), BenchmarkError> {
    for (i, pair) in records.windows(2).enumerate() {
        if pair[0].cmp_by(&pair[1], key) == Ordering::Greater {
            return Err(BenchmarkError::Verification {
                index: i + 1,
                reason: format!(
                    "{} '{}' follows '{}'",
                    key,
                    pair[1].key_string(key),
                    pair[0].key_string(key)
                ),
            });
        }
    }
    Ok(())
}

/// `output` must contain the same multiset of records as `input`.
pub fn check_permutation(input: &[Record], output: &[Record]) -> Result<(), BenchmarkError> {
    if input.len() != output.len() {
        return Err(BenchmarkError::Verification {
            index: output.len().min(input.len()),
            reason: format!(
                "expected {} records, found {}",
                input.len(),
                output.len()
            ),
        });
    }

    let mut counts: HashMap<&Record, isize> = HashMap::with_capacity(input.len());
    for record in input {
        *counts.entry(record).or_insert(0) += 1;
    }
    for (i, record) in output.iter().enumerate() {
        match counts.get_mut(record) {
            Some(count) if *count > 0 => *count -= 1,
            _ => {
                return Err(BenchmarkError::Verification {
                    index: i,
                    reason: format!("record {} is not part of the input", record),
                });
            }
        }
    }
    Ok(())
}
