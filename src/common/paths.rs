//! Scenario and configuration path resolution
//!
//! Scenarios live as subdirectories of a single root; the shared fixture
//! entry point sits one level above them and is invoked with the scenario
//! directory as the working directory.

use std::path::{Path, PathBuf};

use super::{Error, Result};

/// Default scenarios root, relative to the invoking directory
pub const DEFAULT_SCENARIOS_DIR: &str = "tests/scenarios";

/// Default entry point, relative to a scenario's working directory
pub const DEFAULT_ENTRY_POINT: &str = "../run-fixture.sh";

/// Name of the optional harness configuration file
pub const CONFIG_FILE: &str = "harness.toml";

/// Resolve a scenario's fixture directory and verify it exists
pub fn scenario_dir(root: &Path, name: &str) -> Result<PathBuf> {
    let dir = root.join(name);
    if !dir.is_dir() {
        return Err(Error::scenario_not_found(name, dir));
    }
    Ok(dir)
}

/// List scenario names under the root: every subdirectory, sorted
pub fn list_scenarios(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_dir_missing() {
        let err = scenario_dir(Path::new("/nonexistent-root"), "nope").unwrap_err();
        assert!(matches!(err, Error::ScenarioNotFound { .. }));
    }

    #[test]
    fn test_list_scenarios_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("b")).unwrap();
        std::fs::create_dir(tmp.path().join("a")).unwrap();
        std::fs::write(tmp.path().join("run-fixture.sh"), "").unwrap();

        let names = list_scenarios(tmp.path()).unwrap();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
