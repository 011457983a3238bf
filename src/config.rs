//! Generation settings: built-in defaults, optionally overridden from a TOML
//! file pointed at by CONFIG_PATH.
//!
//! See `GenSettings` for the expected schema. Any IO/parse error falls back to
//! defaults with an error log; a bad config file must never stop the server.

use serde::Deserialize;
use tracing::{error, info};

/// Tunables for the generation pipeline. Defaults match the service's
/// production values; override in TOML when tuning yield/latency.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GenSettings {
  /// Base sampling temperature for the first attempt.
  pub temperature: f32,
  /// Examples returned by /api/examples when the caller does not say.
  pub num_examples: usize,
  /// Attempt budget for a single generation call (network-level retries).
  pub max_retries: u32,
  /// Full regenerate attempts the orchestrator may add after the first.
  pub max_generation_retries: u32,
  /// Overrides the MODEL_NAME env variable when set.
  pub model: Option<String>,
}

impl Default for GenSettings {
  fn default() -> Self {
    Self {
      temperature: 0.7,
      num_examples: 5,
      max_retries: 3,
      max_generation_retries: 3,
      model: None,
    }
  }
}

/// Load settings from CONFIG_PATH if set and parseable, else defaults.
pub fn load_settings_from_env() -> GenSettings {
  let path = match std::env::var("CONFIG_PATH") {
    Ok(p) => p,
    Err(_) => return GenSettings::default(),
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GenSettings>(&s) {
      Ok(cfg) => {
        info!(target: "reibun_backend", %path, "Loaded generation settings (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "reibun_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        GenSettings::default()
      }
    },
    Err(e) => {
      error!(target: "reibun_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      GenSettings::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toml_overrides_merge_with_defaults() {
    let cfg: GenSettings = toml::from_str("temperature = 0.4\nnum_examples = 3").unwrap();
    assert_eq!(cfg.num_examples, 3);
    assert!((cfg.temperature - 0.4).abs() < f32::EPSILON);
    assert_eq!(cfg.max_retries, GenSettings::default().max_retries);
    assert!(cfg.model.is_none());
  }

  #[test]
  fn model_override_parses() {
    let cfg: GenSettings = toml::from_str("model = \"gemini-1.5-pro\"").unwrap();
    assert_eq!(cfg.model.as_deref(), Some("gemini-1.5-pro"));
  }
}
