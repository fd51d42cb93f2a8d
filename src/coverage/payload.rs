//! Out-of-band coverage payload extraction
//!
//! The payload rides on a single stdout line of the form
//! `##jscoverage##{...}`: the marker followed immediately by a JSON object
//! with per-file source lines and call counts. Counts are nullable; a null
//! marks a line that was never instrumented.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::common::Result;

/// Marker prefix a fixture prints before its JSON coverage body
pub const COVERAGE_MARKER: &str = "##jscoverage##";

/// Per-file coverage data emitted by one instrumented child process
#[derive(Debug, Clone, Deserialize)]
pub struct CoveragePayload {
    /// filename -> ordered source line strings
    #[serde(rename = "sourceArrays")]
    pub source_arrays: BTreeMap<String, Vec<String>>,

    /// filename -> ordered call counts, null for non-instrumented lines
    #[serde(rename = "callCounts")]
    pub call_counts: BTreeMap<String, Vec<Option<u64>>>,
}

impl CoveragePayload {
    /// Extract a payload from captured stdout, if the marker line is present
    ///
    /// Scans for the first line containing the marker; everything after the
    /// marker on that line is the JSON body. Returns `Ok(None)` when no
    /// marker is found. The payload is self-generated and trusted, so a
    /// malformed body is a hard error with no recovery path.
    pub fn from_stdout(stdout: &str) -> Result<Option<Self>> {
        for line in stdout.lines() {
            if let Some(at) = line.find(COVERAGE_MARKER) {
                let body = &line[at + COVERAGE_MARKER.len()..];
                let payload = serde_json::from_str(body)?;
                return Ok(Some(payload));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn test_no_marker_is_none() {
        let payload = CoveragePayload::from_stdout("test1\ntest2\nDone.\n").unwrap();
        assert!(payload.is_none());
    }

    #[test]
    fn test_marker_line_is_parsed() {
        let stdout = "test1\n\
                      ##jscoverage##{\"sourceArrays\":{\"a.js\":[\"x\"]},\"callCounts\":{\"a.js\":[1,null]}}\n\
                      Done.\n";
        let payload = CoveragePayload::from_stdout(stdout).unwrap().unwrap();
        assert_eq!(payload.source_arrays["a.js"], vec!["x".to_string()]);
        assert_eq!(payload.call_counts["a.js"], vec![Some(1), None]);
    }

    #[test]
    fn test_marker_mid_line_is_found() {
        let stdout = ">> ##jscoverage##{\"sourceArrays\":{},\"callCounts\":{}}";
        let payload = CoveragePayload::from_stdout(stdout).unwrap().unwrap();
        assert!(payload.source_arrays.is_empty());
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let err = CoveragePayload::from_stdout("##jscoverage##{not json").unwrap_err();
        assert!(matches!(err, Error::CoveragePayload(_)));
    }
}
