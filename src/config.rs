use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Runtime configuration for the ETL pipeline.
///
/// Loaded from `config.toml` when present; every field has a default so the
/// pipeline also runs unconfigured.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records buffered per batch in streaming mode.
    pub batch_size: usize,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { batch_size: 100 }
    }
}

impl EtlConfig {
    /// Load configuration from `config.toml`, falling back to defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: EtlConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_file_missing() {
        let config = EtlConfig::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config.pipeline.batch_size, 100);
    }

    #[test]
    fn loads_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nbatch_size = 25").unwrap();
        let config = EtlConfig::load_from(file.path()).unwrap();
        assert_eq!(config.pipeline.batch_size, 25);
    }
}
