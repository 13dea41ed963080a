//! Engine configuration from `tictactoe.toml`.
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`TICTACTOE_DIFFICULTY`, `TICTACTOE_SEED`, `TICTACTOE_LOG_LEVEL`)
//! 2. The config file
//! 3. Built-in defaults
//!
//! ```toml
//! difficulty = "error:20"
//! seed = 42
//! log_level = "debug"
//!
//! [model]
//! weights = [3.9, 3.6, 4.0, 3.7, 4.3, 3.6, 4.0, 3.7, 4.0]
//! bias = -1.6
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::TOTAL_CELLS;
use crate::engine::{AIEngine, Difficulty};
use crate::error::{Error, Result};
use crate::eval::LinearModel;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TICTACTOE_CONFIG";

/// Locations searched when no explicit path is given
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "tictactoe.toml",    // Current directory
    "../tictactoe.toml", // Parent directory
];

/// Linear model override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub weights: [f64; TOTAL_CELLS],
    pub bias: f64,
}

impl From<ModelConfig> for LinearModel {
    fn from(cfg: ModelConfig) -> Self {
        LinearModel::new(cfg.weights, cfg.bias)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parsed with [`Difficulty::from_str`](std::str::FromStr)
    pub difficulty: String,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Replaces the pretrained linear weights
    pub model: Option<ModelConfig>,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default().to_string(),
            seed: None,
            model: None,
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn difficulty(&self) -> Result<Difficulty> {
        self.difficulty.parse()
    }

    pub fn linear_model(&self) -> LinearModel {
        self.model.clone().map(LinearModel::from).unwrap_or_default()
    }

    /// Engine built from this config. An unparsable difficulty falls back to
    /// the default with a warning.
    pub fn build_engine(&self) -> AIEngine {
        let difficulty = self.difficulty().unwrap_or_else(|e| {
            warn!("{e}, using {}", Difficulty::default());
            Difficulty::default()
        });
        let engine = match self.seed {
            Some(seed) => AIEngine::with_seed(difficulty, seed),
            None => AIEngine::with_difficulty(difficulty),
        };
        engine.with_model(self.linear_model())
    }
}

/// Strict parse: malformed TOML or an invalid difficulty is an error.
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content)?;
    config.difficulty()?;
    Ok(config)
}

/// Read and strictly parse one file.
pub fn read_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Load configuration, searching `$TICTACTOE_CONFIG` then [`CONFIG_SEARCH_PATHS`].
///
/// Never fails: unreadable or invalid files fall back to defaults with a
/// warning. Environment overrides are applied last.
pub fn load_config() -> EngineConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(&path);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV_VAR, path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    debug!("No tictactoe.toml found, using built-in defaults");
    apply_env_overrides(EngineConfig::default())
}

/// Load from a specific path, falling back to defaults on any error.
pub fn load_from_path(path: &Path) -> EngineConfig {
    match read_config(path) {
        Ok(config) => apply_env_overrides(config),
        Err(e) => {
            warn!("{}, using defaults", e);
            apply_env_overrides(EngineConfig::default())
        }
    }
}

/// Apply `TICTACTOE_*` environment overrides.
pub fn apply_env_overrides(config: EngineConfig) -> EngineConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup. Unparsable values are ignored with a warning.
pub fn apply_overrides<F>(mut config: EngineConfig, lookup: F) -> EngineConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("TICTACTOE_DIFFICULTY") {
        match v.parse::<Difficulty>() {
            Ok(d) => config.difficulty = d.to_string(),
            Err(e) => warn!("Ignoring TICTACTOE_DIFFICULTY: {e}"),
        }
    }
    if let Some(v) = lookup("TICTACTOE_SEED") {
        match v.trim().parse::<u64>() {
            Ok(seed) => config.seed = Some(seed),
            Err(_) => warn!("Ignoring TICTACTOE_SEED={v}: not an integer"),
        }
    }
    if let Some(v) = lookup("TICTACTOE_LOG_LEVEL") {
        config.log_level = v;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.difficulty().unwrap(), Difficulty::Perfect);
        assert_eq!(config.seed, None);
        assert_eq!(config.linear_model(), LinearModel::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let config = parse_config(
            r#"
            difficulty = "shallow:3"
            seed = 7
            log_level = "debug"

            [model]
            weights = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
            bias = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.difficulty().unwrap(), Difficulty::DepthLimited(3));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, "debug");
        let model = config.linear_model();
        assert_eq!(model.weights[8], 9.0);
        assert_eq!(model.bias, 0.5);
    }

    #[test]
    fn test_parse_rejects_bad_difficulty() {
        assert!(matches!(
            parse_config("difficulty = \"error:150\""),
            Err(Error::ErrorRateOutOfRange(150))
        ));
        assert!(matches!(parse_config("difficulty = \"nope\""), Err(Error::InvalidDifficulty(_))));
    }

    #[test]
    fn test_parse_rejects_short_weights() {
        let result = parse_config("[model]\nweights = [1.0, 2.0]\nbias = 0.0");
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_config(Path::new("/definitely/not/here/tictactoe.toml"));
        assert!(matches!(result, Err(Error::ConfigIo { .. })));
    }

    #[test]
    fn test_load_from_path_falls_back() {
        let config = load_from_path(Path::new("/definitely/not/here/tictactoe.toml"));
        assert_eq!(config.seed, apply_env_overrides(EngineConfig::default()).seed);
    }

    #[test]
    fn test_overrides() {
        let config = apply_overrides(
            EngineConfig::default(),
            lookup_from(&[
                ("TICTACTOE_DIFFICULTY", "medium"),
                ("TICTACTOE_SEED", "123"),
                ("TICTACTOE_LOG_LEVEL", "trace"),
            ]),
        );
        assert_eq!(config.difficulty().unwrap(), Difficulty::ErrorRate(20));
        assert_eq!(config.seed, Some(123));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_invalid_overrides_ignored() {
        let config = apply_overrides(
            EngineConfig::default(),
            lookup_from(&[("TICTACTOE_DIFFICULTY", "shallow:0"), ("TICTACTOE_SEED", "abc")]),
        );
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_build_engine() {
        let config = EngineConfig {
            difficulty: "easy".to_string(),
            seed: Some(1),
            ..EngineConfig::default()
        };
        let engine = config.build_engine();
        assert_eq!(engine.difficulty(), Difficulty::Linear);

        let bad = EngineConfig {
            difficulty: "impossible".to_string(),
            ..EngineConfig::default()
        };
        assert_eq!(bad.build_engine().difficulty(), Difficulty::Perfect);
    }
}
