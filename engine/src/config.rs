use serde::Deserialize;
use std::path::PathBuf;

use tally_types::UiOptions;

/// Contents of `~/.tally/config.toml`. Every field is optional; a missing
/// or malformed file degrades to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct TallyConfig {
    pub app: Option<AppConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// ```toml
/// [app]
/// ascii_only = false
/// high_contrast = false
/// reduced_motion = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for the keypad and status bar.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Disable the keypad press flash.
    #[serde(default)]
    pub reduced_motion: bool,
}

impl TallyConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Presentation flags for the UI layers.
    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        let app = self.app.as_ref();
        UiOptions {
            ascii_only: app.is_some_and(|a| a.ascii_only),
            high_contrast: app.is_some_and(|a| a.high_contrast),
            reduced_motion: app.is_some_and(|a| a.reduced_motion),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tally").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config: TallyConfig = toml::from_str("").unwrap();
        assert!(config.app.is_none());
        assert_eq!(config.ui_options(), UiOptions::default());
    }

    #[test]
    fn parse_app_config() {
        let toml_str = r"
[app]
ascii_only = true
high_contrast = false
reduced_motion = true
";
        let config: TallyConfig = toml::from_str(toml_str).unwrap();
        let app = config.app.as_ref().unwrap();
        assert!(app.ascii_only);
        assert!(!app.high_contrast);
        assert!(app.reduced_motion);

        let options = config.ui_options();
        assert!(options.ascii_only);
        assert!(!options.high_contrast);
        assert!(options.reduced_motion);
    }

    #[test]
    fn missing_fields_default_to_false() {
        let toml_str = r"
[app]
high_contrast = true
";
        let config: TallyConfig = toml::from_str(toml_str).unwrap();
        let options = config.ui_options();
        assert!(!options.ascii_only);
        assert!(options.high_contrast);
        assert!(!options.reduced_motion);
    }

    #[test]
    fn config_roundtrips_through_a_file() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let config_path = tmp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[app]\nascii_only = true\n").unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        let config: TallyConfig = toml::from_str(&content).unwrap();
        assert!(config.ui_options().ascii_only);
    }

    #[test]
    fn config_error_path_accessor() {
        let path = PathBuf::from("/test/path");
        let err = ConfigError::Read {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.path(), &path);

        let parse_err = ConfigError::Parse {
            path: path.clone(),
            source: toml::from_str::<TallyConfig>("invalid toml [").unwrap_err(),
        };
        assert_eq!(parse_err.path(), &path);
    }
}
