//! Transform configuration.

use crate::types::Vector3;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io::BufReader;
use std::path::Path;

/// Tunables of the global → curvilinear transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Charges with a smaller magnitude are treated as neutral (q/p = 1/p).
    pub charge_tolerance: f64,
    /// Direction used when the momentum has zero magnitude.
    pub degenerate_direction: [f64; 3],
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            charge_tolerance: 1e-4,
            degenerate_direction: [0.0, 0.0, 1.0],
        }
    }
}

impl TransformConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load_json(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening transform config {}", path.display()))?;
        let config: TransformConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing transform config {}", path.display()))?;
        Ok(config)
    }

    /// Unit fallback direction; +ẑ if the configured one is unusable.
    pub fn fallback_direction(&self) -> Vector3 {
        Vector3::from(self.degenerate_direction)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: TransformConfig = serde_json::from_str(r#"{"charge_tolerance": 0.01}"#).unwrap();
        assert_eq!(config.charge_tolerance, 0.01);
        assert_eq!(config.degenerate_direction, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn fallback_direction_is_normalised() {
        let config = TransformConfig {
            degenerate_direction: [3.0, 0.0, 4.0],
            ..TransformConfig::default()
        };
        assert_eq!(config.fallback_direction(), Vector3::new(0.6, 0.0, 0.8));

        let broken = TransformConfig {
            degenerate_direction: [0.0, 0.0, 0.0],
            ..TransformConfig::default()
        };
        assert_eq!(broken.fallback_direction(), Vector3::z());
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = TransformConfig::load_json(Path::new("/nonexistent/transform.json")).unwrap_err();
        assert!(err.to_string().contains("opening transform config"));
    }
}
