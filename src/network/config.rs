use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{NetworkError, Result};

/// Construction parameters of a [`Network`](crate::Network).
///
/// Widths are fixed for the lifetime of the network built from this config.
/// The config can be stored as JSON independently of any trained weights:
///
/// ```json
/// { "input_size": 784, "hidden_size": 100, "output_size": 10, "learning_rate": 0.1 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of input values fed to the network.
    pub input_size: usize,
    /// Number of nodes in the single hidden layer.
    pub hidden_size: usize,
    /// Number of output nodes.
    pub output_size: usize,
    /// Step size applied to every weight delta during training.
    pub learning_rate: f64,
}

impl NetworkConfig {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize, learning_rate: f64) -> Self {
        NetworkConfig { input_size, hidden_size, output_size, learning_rate }
    }

    /// Checks that every width is non-zero and the learning rate is a
    /// positive finite number.
    pub fn validate(&self) -> Result<()> {
        for (name, width) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if width == 0 {
                return Err(NetworkError::InvalidConfig(format!("{name} must be at least 1")));
            }
        }
        validate_learning_rate(self.learning_rate)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(NetworkError::InvalidConfig(format!(
            "learning_rate must be positive and finite, got {learning_rate}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_positive_widths_and_rate() {
        assert!(NetworkConfig::new(784, 100, 10, 0.1).validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_width() {
        let err = NetworkConfig::new(2, 0, 1, 0.5).validate().unwrap_err();
        assert!(err.to_string().contains("hidden_size"));
    }

    #[test]
    fn validate_rejects_bad_learning_rate() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NetworkConfig::new(2, 2, 1, lr).validate(),
                Err(NetworkError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn json_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("shallow-nn-config-{}.json", std::process::id()));
        let config = NetworkConfig::new(3, 5, 2, 0.25);
        config.save_json(&path).unwrap();
        let loaded = NetworkConfig::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_json_validates() {
        let path = std::env::temp_dir().join(format!("shallow-nn-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"input_size":0,"hidden_size":2,"output_size":1,"learning_rate":0.5}"#).unwrap();
        let result = NetworkConfig::load_json(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn load_json_reports_missing_file() {
        let result = NetworkConfig::load_json("/nonexistent/shallow-nn/config.json");
        assert!(matches!(result, Err(NetworkError::Io(_))));
    }
}
