//! Loading the configuration record.
//!
//! ```text
//! defaults → TOML file → environment → command-line flags
//!     → validate_config
//!     → DataLayout::ensure
//! ```
//!
//! The file layer comes from `--config` or the platform path; the
//! environment and flag layers arrive together as [`Overrides`] because
//! each flag reads its `ECOWATCH_*` variable as a fallback.

use crate::config::{
    Config, Overrides, config_file_path, default_base_dir, load_config_file, validate_config,
};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Where to read configuration from and what to override.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file. Must exist when set.
    pub config_path: Option<PathBuf>,
    /// Values that take precedence over the file.
    pub overrides: Overrides,
}

impl LoadOptions {
    /// Options that read a specific file and apply no overrides.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            overrides: Overrides::default(),
        }
    }

    /// Config file this load reads, if one can be determined.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(|| config_file_path().ok())
    }
}

/// Read, merge and validate the configuration without touching the
/// directory layout.
pub fn resolve(options: &LoadOptions) -> Result<Config> {
    let mut config = match &options.config_path {
        Some(path) if !path.exists() => {
            return Err(Error::ConfigNotFound { path: path.clone() });
        }
        Some(path) => load_config_file(path)?,
        None => match config_file_path() {
            Ok(path) => load_config_file(&path)?,
            Err(_) => Config::default(),
        },
    };

    let applied = options.overrides.clone().apply(&mut config);
    if !applied.is_empty() {
        debug!(fields = ?applied, "applied configuration overrides");
    }

    if config.paths.base_dir.is_none() {
        config.paths.base_dir = Some(default_base_dir()?);
    }

    validate_config(&config)?;
    Ok(config)
}

/// Load the configuration record and prepare the directory layout.
///
/// Either returns a fully valid record whose directories all exist, or
/// fails without starting anything else.
pub fn load(options: &LoadOptions) -> Result<Config> {
    let config = resolve(options)?;
    let layout = config.layout();
    layout.ensure()?;

    info!(
        base_dir = %layout.base.display(),
        version = %config.project.version,
        "configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, body).unwrap();
        path
    }

    fn station_config(dir: &Path) -> PathBuf {
        write_config(dir, "[paths]\nbase_dir = \"station\"\n")
    }

    #[test]
    fn test_load_creates_layout() {
        let tmp = TempDir::new().unwrap();
        let config = load(&LoadOptions::with_file(station_config(tmp.path()))).unwrap();

        let layout = config.layout();
        assert_eq!(layout.base, tmp.path().join("station"));
        for dir in layout.directories() {
            assert!(dir.is_dir());
        }
    }

    #[test]
    fn test_load_twice_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let options = LoadOptions::with_file(station_config(tmp.path()));

        let first = load(&options).unwrap();
        let second = load(&options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_fails_when_directory_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let options = LoadOptions::with_file(station_config(tmp.path()));
        fs::create_dir_all(tmp.path().join("station")).unwrap();
        fs::write(tmp.path().join("station").join("models"), "weights").unwrap();

        let err = load(&options).unwrap_err();
        assert!(matches!(err, Error::DirectoryObstructed { .. }));
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }

    #[test]
    fn test_resolve_does_not_create_directories() {
        let tmp = TempDir::new().unwrap();
        let config = resolve(&LoadOptions::with_file(station_config(tmp.path()))).unwrap();
        assert!(!config.layout().base.exists());
    }

    #[test]
    fn test_validation_failure_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "[paths]\nbase_dir = \"station\"\n\n[alerts]\nmin_animals = 50\nmax_animals = 10\n",
        );

        let err = load(&LoadOptions::with_file(path)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("alerts.min_animals"));
        assert!(!tmp.path().join("station").exists());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(&LoadOptions::with_file(tmp.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "[paths]\nbase_dir = \"station\"\n\n[performance]\nbatch_size = 4\n",
        );
        let options = LoadOptions {
            config_path: Some(path),
            overrides: Overrides {
                batch_size: Some(64),
                base_dir: Some(tmp.path().join("elsewhere")),
                ..Overrides::default()
            },
        };

        let config = resolve(&options).unwrap();
        assert_eq!(config.performance.batch_size, 64);
        assert_eq!(config.paths.base_dir, Some(tmp.path().join("elsewhere")));
    }

    #[test]
    fn test_override_out_of_range_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let options = LoadOptions {
            config_path: Some(station_config(tmp.path())),
            overrides: Overrides {
                audio_confidence: Some(1.5),
                ..Overrides::default()
            },
        };

        let err = resolve(&options).unwrap_err();
        assert!(err.to_string().contains("audio.confidence_threshold"));
    }

    #[test]
    fn test_unknown_export_format_fails_at_load() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            tmp.path(),
            "[paths]\nbase_dir = \"station\"\n\n[export]\nformat = \"pdf\"\n",
        );

        let err = load(&LoadOptions::with_file(path)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
