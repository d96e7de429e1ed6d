//! Game configuration: board size, spawn odds and RNG seed.
//!
//! Loadable from TOML; every field is optional and falls back to the defaults
//! below (4×4 board, 90% twos, entropy-seeded RNG).
//!
//! ```
//! use tilemerge::config::GameConfig;
//! let cfg: GameConfig = toml::from_str("size = 5\nseed = 7").unwrap();
//! assert_eq!(cfg.size, 5);
//! assert_eq!(cfg.probability_of_two, 0.9);
//! assert!(cfg.validate().is_ok());
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("board size must be at least 2, got {0}")]
    Size(usize),
    #[error("probability_of_two must be within [0, 1], got {0}")]
    Probability(f64),
    #[error("grid is {actual}x{actual} but config asks for {expected}x{expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length N of the square board.
    pub size: usize,
    /// Chance that a spawned tile is a 2 rather than a 4.
    pub probability_of_two: f64,
    /// Fixed RNG seed for reproducible games. `None` seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { size: defaults::size(), probability_of_two: defaults::probability_of_two(), seed: None }
    }
}

impl GameConfig {
    pub fn new(size: usize, probability_of_two: f64) -> Self {
        Self { size, probability_of_two, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::Size(self.size));
        }
        if !self.probability_of_two.is_finite() || !(0.0..=1.0).contains(&self.probability_of_two) {
            return Err(ConfigError::Probability(self.probability_of_two));
        }
        Ok(())
    }

    /// Read and validate a TOML config file.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

mod defaults {
    pub fn size() -> usize { 4 }
    pub fn probability_of_two() -> f64 { 0.9 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.size, 4);
        assert_eq!(cfg.probability_of_two, 0.9);
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(GameConfig::new(1, 0.9).validate(), Err(ConfigError::Size(1))));
        assert!(matches!(GameConfig::new(4, 1.5).validate(), Err(ConfigError::Probability(_))));
        assert!(matches!(GameConfig::new(4, f64::NAN).validate(), Err(ConfigError::Probability(_))));
        assert!(GameConfig::new(4, 0.0).validate().is_ok());
        assert!(GameConfig::new(4, 1.0).validate().is_ok());
    }

    #[test]
    fn loads_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "size = 6\nprobability_of_two = 0.75\nseed = 42").unwrap();
        let cfg = GameConfig::from_toml(tmp.path()).unwrap();
        assert_eq!(cfg, GameConfig::new(6, 0.75).with_seed(42));
    }

    #[test]
    fn file_with_invalid_values_fails() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "probability_of_two = 2.0").unwrap();
        assert!(matches!(GameConfig::from_toml(tmp.path()), Err(ConfigError::Probability(_))));

        let mut garbage = NamedTempFile::new().unwrap();
        writeln!(garbage, "size = \"four\"").unwrap();
        assert!(matches!(GameConfig::from_toml(garbage.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::from_toml(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
