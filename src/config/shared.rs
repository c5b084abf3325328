//! Shared, atomically replaceable configuration handle.

use crate::config::{Config, LoadOptions, load, validate_config};
use crate::error::Result;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Handle to the current configuration record.
///
/// Clones share the same record. Readers take a snapshot with
/// [`SharedConfig::current`] and keep it for as long as they need a
/// consistent view; a replacement is published in a single swap, so a
/// snapshot is always one whole record.
#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<Config>>,
}

impl SharedConfig {
    /// Wrap a loaded record.
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> Arc<Config> {
        self.inner.load_full()
    }

    /// Publish a new record, returning the one it replaced.
    ///
    /// The record is validated and its directory layout prepared first;
    /// on either failure the current record stays in place.
    pub fn replace(&self, config: Config) -> Result<Arc<Config>> {
        validate_config(&config)?;
        config.layout().ensure()?;
        Ok(self.inner.swap(Arc::new(config)))
    }

    /// Load a fresh record and publish it.
    ///
    /// On failure the current record stays published.
    pub fn reload(&self, options: &LoadOptions) -> Result<()> {
        let config = load(options)?;
        self.inner.store(Arc::new(config));
        info!("configuration reloaded");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorKind};
    use std::path::Path;
    use std::thread;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.paths.base_dir = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn test_replace_publishes_to_all_clones() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));
        let reader = shared.clone();

        let mut next = config_in(tmp.path());
        next.performance.batch_size = 64;
        let previous = shared.replace(next).unwrap();

        assert_eq!(previous.performance.batch_size, 16);
        assert_eq!(reader.current().performance.batch_size, 64);
    }

    #[test]
    fn test_replace_rejects_invalid_record() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));

        let mut next = config_in(&tmp.path().join("next"));
        next.alerts.min_animals = 50;
        next.alerts.max_animals = 10;

        assert!(shared.replace(next).is_err());
        assert_eq!(shared.current().alerts.min_animals, 10);
        assert!(!tmp.path().join("next").exists());
    }

    #[test]
    fn test_replace_creates_layout_before_publishing() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));

        shared.replace(config_in(&tmp.path().join("moved"))).unwrap();

        let current = shared.current();
        for dir in current.layout().directories() {
            assert!(dir.is_dir(), "{} missing", dir.display());
        }
    }

    #[test]
    fn test_replace_with_obstructed_layout_keeps_current_record() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));
        std::fs::write(tmp.path().join("blocked"), "file").unwrap();

        let err = shared
            .replace(config_in(&tmp.path().join("blocked")))
            .unwrap_err();

        assert!(matches!(err, Error::DirectoryObstructed { .. }));
        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert_eq!(shared.current().paths.base_dir.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn test_snapshot_survives_replacement() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));
        let snapshot = shared.current();

        let mut next = config_in(tmp.path());
        next.performance.num_workers = 12;
        shared.replace(next).unwrap();

        assert_eq!(snapshot.performance.num_workers, 4);
    }

    #[test]
    fn test_readers_never_see_partial_record() {
        let tmp = TempDir::new().unwrap();
        let shared = SharedConfig::new(config_in(tmp.path()));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        let config = shared.current();
                        // Every published record keeps both values equal.
                        assert_eq!(
                            config.performance.batch_size * 4,
                            config.performance.num_workers * 16
                        );
                    }
                })
            })
            .collect();

        for n in 1..=200 {
            let mut next = config_in(tmp.path());
            next.performance.batch_size = 16 * n;
            next.performance.num_workers = 4 * n;
            shared.replace(next).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_reload_failure_keeps_current_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[paths]\nbase_dir = \"station\"\n").unwrap();
        let options = LoadOptions::with_file(&path);

        let shared = SharedConfig::new(load(&options).unwrap());

        std::fs::write(
            &path,
            "[paths]\nbase_dir = \"station\"\n\n[performance]\nbatch_size = 0\n",
        )
        .unwrap();
        assert!(shared.reload(&options).is_err());
        assert_eq!(shared.current().performance.batch_size, 16);

        std::fs::write(
            &path,
            "[paths]\nbase_dir = \"station\"\n\n[performance]\nbatch_size = 8\n",
        )
        .unwrap();
        shared.reload(&options).unwrap();
        assert_eq!(shared.current().performance.batch_size, 8);
    }
}
