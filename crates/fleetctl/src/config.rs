//! Operator configuration file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings the CLI reads from an optional YAML file. Command-line flags
/// override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Base URL of the remote service endpoint.
    pub base_url: String,
    /// Delay between successive polling-config submissions, in
    /// milliseconds. Zero disables pacing.
    pub pacing_ms: u64,
    /// Abort a batch on the first failure instead of continuing.
    pub fail_fast: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        FleetConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            pacing_ms: 1000,
            fail_fast: true,
        }
    }
}

impl FleetConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FleetConfig::default();
        assert_eq!(config.pacing_ms, 1000);
        assert!(config.fail_fast);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url: https://fleet.lab:8443").unwrap();

        let config = FleetConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url, "https://fleet.lab:8443");
        assert_eq!(config.pacing_ms, 1000);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(FleetConfig::load(Path::new("/no/such/fleet.yaml")).is_err());
    }
}
