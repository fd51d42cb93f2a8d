//! Cross-run coverage aggregation
//!
//! The accumulator is owned by the harness driving a suite run and is fed
//! one payload per instrumented scenario. Holding it behind `&mut self`
//! serializes merges; there is no ambient global to initialize.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use super::CoveragePayload;
use crate::common::{Error, Result};

/// Cumulative coverage for one file: call counts with the source attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCoverage {
    /// Cumulative call counts; null marks a non-instrumented line
    pub counts: Vec<Option<u64>>,
    /// Source lines, taken verbatim from the first payload seen for the file
    pub source: Vec<String>,
}

/// Aggregate of coverage payloads across every scenario in one suite run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoverageAccumulator {
    files: BTreeMap<String, FileCoverage>,
}

impl CoverageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one payload into the aggregate
    ///
    /// For each filename in the payload's source map: a new file is stored
    /// verbatim; for a known file, every non-null incoming count is added
    /// into the slot at the same index, while incoming nulls leave the
    /// existing slot untouched. Counts at the same index are assumed to
    /// align to the same source line across merges; source arrays are not
    /// re-validated.
    pub fn merge(&mut self, payload: CoveragePayload) -> Result<()> {
        let CoveragePayload {
            source_arrays,
            mut call_counts,
        } = payload;

        for (filename, source) in source_arrays {
            let counts = call_counts
                .remove(&filename)
                .ok_or_else(|| Error::MissingCallCounts(filename.clone()))?;

            match self.files.get_mut(&filename) {
                None => {
                    debug!(file = %filename, lines = counts.len(), "recording coverage");
                    self.files.insert(filename, FileCoverage { counts, source });
                }
                Some(existing) => {
                    debug!(file = %filename, "merging coverage");
                    for (index, count) in counts.into_iter().enumerate() {
                        let Some(count) = count else { continue };
                        if index < existing.counts.len() {
                            let slot = &mut existing.counts[index];
                            *slot = Some(slot.unwrap_or(0) + count);
                        } else {
                            existing.counts.push(Some(count));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Scan captured stdout for a payload and merge it if present
    ///
    /// Returns whether a payload was found.
    pub fn absorb_stdout(&mut self, stdout: &str) -> Result<bool> {
        match CoveragePayload::from_stdout(stdout)? {
            Some(payload) => {
                self.merge(payload)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, filename: &str) -> Option<&FileCoverage> {
        self.files.get(filename)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &FileCoverage)> {
        self.files.iter().map(|(name, cov)| (name.as_str(), cov))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(filename: &str, counts: &[Option<u64>], source: &[&str]) -> CoveragePayload {
        let mut source_arrays = BTreeMap::new();
        let mut call_counts = BTreeMap::new();
        source_arrays.insert(
            filename.to_string(),
            source.iter().map(|s| s.to_string()).collect(),
        );
        call_counts.insert(filename.to_string(), counts.to_vec());
        CoveragePayload {
            source_arrays,
            call_counts,
        }
    }

    #[test]
    fn test_first_payload_stored_verbatim() {
        let mut acc = CoverageAccumulator::new();
        acc.merge(payload("a.js", &[Some(1), None, Some(2)], &["l1", "l2", "l3"]))
            .unwrap();

        let file = acc.get("a.js").unwrap();
        assert_eq!(file.counts, vec![Some(1), None, Some(2)]);
        assert_eq!(file.source, vec!["l1", "l2", "l3"]);
    }

    #[test]
    fn test_merge_adds_non_null_counts() {
        let mut acc = CoverageAccumulator::new();
        acc.merge(payload("a.js", &[Some(1), None, Some(2)], &["l1", "l2", "l3"]))
            .unwrap();
        acc.merge(payload("a.js", &[Some(3), None, Some(4)], &["l1", "l2", "l3"]))
            .unwrap();

        assert_eq!(acc.get("a.js").unwrap().counts, vec![Some(4), None, Some(6)]);
    }

    #[test]
    fn test_merge_is_idempotent_additive() {
        // Merging the same payload twice doubles every non-null count and
        // leaves null markers null.
        let mut acc = CoverageAccumulator::new();
        let p = payload("a.js", &[Some(1), None, Some(5), None], &["a", "b", "c", "d"]);
        acc.merge(p.clone()).unwrap();
        acc.merge(p).unwrap();

        assert_eq!(
            acc.get("a.js").unwrap().counts,
            vec![Some(2), None, Some(10), None]
        );
    }

    #[test]
    fn test_disjoint_files_accumulate_independently() {
        let mut acc = CoverageAccumulator::new();
        acc.merge(payload("a.js", &[Some(1)], &["x"])).unwrap();
        acc.merge(payload("b.js", &[Some(7), None], &["y", "z"])).unwrap();

        assert_eq!(acc.len(), 2);
        assert_eq!(acc.get("a.js").unwrap().counts, vec![Some(1)]);
        assert_eq!(acc.get("b.js").unwrap().counts, vec![Some(7), None]);
    }

    #[test]
    fn test_incoming_count_fills_null_slot() {
        let mut acc = CoverageAccumulator::new();
        acc.merge(payload("a.js", &[None, Some(1)], &["x", "y"])).unwrap();
        acc.merge(payload("a.js", &[Some(2), Some(1)], &["x", "y"])).unwrap();

        assert_eq!(acc.get("a.js").unwrap().counts, vec![Some(2), Some(2)]);
    }

    #[test]
    fn test_longer_incoming_counts_are_appended() {
        let mut acc = CoverageAccumulator::new();
        acc.merge(payload("a.js", &[Some(1)], &["x"])).unwrap();
        acc.merge(payload("a.js", &[Some(1), Some(3)], &["x", "y"])).unwrap();

        assert_eq!(acc.get("a.js").unwrap().counts, vec![Some(2), Some(3)]);
    }

    #[test]
    fn test_source_without_counts_is_an_error() {
        let mut acc = CoverageAccumulator::new();
        let mut p = payload("a.js", &[Some(1)], &["x"]);
        p.call_counts.clear();

        let err = acc.merge(p).unwrap_err();
        assert!(matches!(err, Error::MissingCallCounts(name) if name == "a.js"));
    }

    #[test]
    fn test_absorb_stdout_without_marker_is_noop() {
        let mut acc = CoverageAccumulator::new();
        let found = acc.absorb_stdout("test1\nDone, without errors.\n").unwrap();
        assert!(!found);
        assert!(acc.is_empty());
    }

    #[test]
    fn test_absorb_stdout_merges_marker_payload() {
        let mut acc = CoverageAccumulator::new();
        let stdout = "##jscoverage##{\"sourceArrays\":{\"a.js\":[\"x\"]},\"callCounts\":{\"a.js\":[2]}}\n";
        assert!(acc.absorb_stdout(stdout).unwrap());
        assert_eq!(acc.get("a.js").unwrap().counts, vec![Some(2)]);
    }
}
