use eyre::{Result, WrapErr as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tenure_core::DateStyle;

/// Settings read from the YAML file named by `TENURE_CONFIG`, if any.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub style: DateStyle,
    /// Registry document used by the `profile` and `year` commands.
    pub data: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self { style: DateStyle::default(), data: PathBuf::from("registry.yaml") }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match dotenv::var("TENURE_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                tracing::debug!("TENURE_CONFIG not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml_str(&yaml)
            .wrap_err_with(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!(?config, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // an empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tenure_core::Locale;

    #[test]
    fn defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.style.locale, Locale::English);
        assert_eq!(config.style.ongoing_marker, "->");
        assert_eq!(config.data, PathBuf::from("registry.yaml"));
    }

    #[test]
    fn partial_override() {
        let config = Config::from_yaml_str("locale: swedish\ndata: /srv/registry.yaml\n").unwrap();
        assert_eq!(config.style.locale, Locale::Swedish);
        assert_eq!(config.style.ongoing_marker, "->");
        assert_eq!(config.data, PathBuf::from("/srv/registry.yaml"));
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(Config::from_yaml_str("locale: klingon\n").is_err());
    }
}
