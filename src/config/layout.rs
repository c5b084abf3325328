//! On-disk directory layout.

use crate::config::Config;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolved directories every subsystem expects to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    /// Base directory.
    pub base: PathBuf,
    /// Data root.
    pub data: PathBuf,
    /// Video input.
    pub videos: PathBuf,
    /// Audio input.
    pub audio: PathBuf,
    /// Images.
    pub images: PathBuf,
    /// Analysis results.
    pub results: PathBuf,
    /// Model weights.
    pub models: PathBuf,
}

impl DataLayout {
    /// Resolve the layout of a configuration record.
    ///
    /// A record that has not been through [`crate::config::load`] may lack
    /// a base directory; the working directory stands in for it.
    pub fn of(config: &Config) -> Self {
        let paths = &config.paths;
        let base = paths
            .base_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let data = base.join(&paths.data_dir);

        Self {
            videos: data.join(&paths.videos_dir),
            audio: data.join(&paths.audio_dir),
            images: data.join(&paths.images_dir),
            results: data.join(&paths.results_dir),
            models: base.join(&paths.models_dir),
            data,
            base,
        }
    }

    /// All directories, parents before children.
    pub fn directories(&self) -> [&Path; 7] {
        [
            self.base.as_path(),
            self.data.as_path(),
            self.videos.as_path(),
            self.audio.as_path(),
            self.images.as_path(),
            self.results.as_path(),
            self.models.as_path(),
        ]
    }

    /// Create every missing directory.
    ///
    /// Existing directories are left alone, so calling this repeatedly is
    /// safe. Fails on the first path that is obstructed by a file, cannot
    /// be written to by this process, or cannot be created.
    pub fn ensure(&self) -> Result<()> {
        for dir in self.directories() {
            ensure_directory(dir)?;
        }
        Ok(())
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => check_writable(path),
        Ok(_) => Err(Error::DirectoryObstructed {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
                path: path.to_path_buf(),
                source: e,
            })?;
            debug!(path = %path.display(), "created directory");
            Ok(())
        }
        Err(e) => Err(Error::DirectoryCreate {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Create and drop a scratch file, so ownership, ACLs and read-only
/// mounts all count.
fn check_writable(path: &Path) -> Result<()> {
    tempfile::Builder::new()
        .prefix(".ecowatch-")
        .tempfile_in(path)
        .map(drop)
        .map_err(|e| Error::DirectoryNotWritable {
            path: path.to_path_buf(),
            source: e,
        })
}

impl Config {
    /// Resolved directory layout of this record.
    pub fn layout(&self) -> DataLayout {
        DataLayout::of(self)
    }

    /// Log file location; relative paths are under the base directory.
    pub fn log_file_path(&self) -> PathBuf {
        if self.logging.file.is_absolute() {
            self.logging.file.clone()
        } else {
            self.layout().base.join(&self.logging.file)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind as Kind;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.paths.base_dir = Some(dir.to_path_buf());
        config
    }

    #[test]
    fn test_layout_nests_media_under_data() {
        let config = config_in(Path::new("/srv/eco"));
        let layout = config.layout();
        assert_eq!(layout.data, Path::new("/srv/eco/data"));
        assert_eq!(layout.videos, Path::new("/srv/eco/data/videos"));
        assert_eq!(layout.results, Path::new("/srv/eco/data/results"));
        assert_eq!(layout.models, Path::new("/srv/eco/models"));
    }

    #[test]
    fn test_ensure_creates_all_directories() {
        let tmp = TempDir::new().unwrap();
        let layout = config_in(&tmp.path().join("root")).layout();

        layout.ensure().unwrap();

        for dir in layout.directories() {
            assert!(dir.is_dir(), "{} was not created", dir.display());
        }
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let layout = config_in(tmp.path()).layout();

        layout.ensure().unwrap();
        fs::write(layout.results.join("keep.csv"), "id\n").unwrap();
        layout.ensure().unwrap();

        assert!(layout.results.join("keep.csv").exists());
    }

    #[test]
    fn test_ensure_rejects_file_in_place_of_directory() {
        let tmp = TempDir::new().unwrap();
        let layout = config_in(tmp.path()).layout();
        fs::write(&layout.data, "not a directory").unwrap();

        let err = layout.ensure().unwrap_err();
        assert!(matches!(err, Error::DirectoryObstructed { ref path } if path == &layout.data));
        assert_eq!(err.kind(), Kind::Filesystem);
    }

    #[test]
    fn test_ensure_leaves_no_scratch_files() {
        let tmp = TempDir::new().unwrap();
        let layout = config_in(tmp.path()).layout();

        layout.ensure().unwrap();
        layout.ensure().unwrap();

        let entries: Vec<_> = fs::read_dir(&layout.models).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[cfg(unix)]
    fn make_read_only(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).unwrap();
    }

    #[cfg(unix)]
    fn restore_writable(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Privileged users ignore permission bits.
    #[cfg(unix)]
    fn can_write_anyway(dir: &Path) -> bool {
        let marker = dir.join("marker");
        let writable = fs::write(&marker, "").is_ok();
        let _ = fs::remove_file(marker);
        writable
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_rejects_directory_without_write_access() {
        let tmp = TempDir::new().unwrap();
        let layout = config_in(tmp.path()).layout();
        layout.ensure().unwrap();

        make_read_only(&layout.results);
        if can_write_anyway(&layout.results) {
            restore_writable(&layout.results);
            return;
        }
        let result = layout.ensure();
        restore_writable(&layout.results);

        let err = result.unwrap_err();
        assert!(
            matches!(err, Error::DirectoryNotWritable { ref path, .. } if path == &layout.results)
        );
        assert_eq!(err.kind(), Kind::Filesystem);
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_reports_directory_it_cannot_create() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("locked");
        fs::create_dir(&parent).unwrap();

        make_read_only(&parent);
        if can_write_anyway(&parent) {
            restore_writable(&parent);
            return;
        }
        let child = parent.join("videos");
        let result = ensure_directory(&child);
        restore_writable(&parent);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::DirectoryCreate { ref path, .. } if path == &child));
        assert_eq!(err.kind(), Kind::Filesystem);
        assert!(!child.exists());
    }

    #[test]
    fn test_log_file_path_relative_to_base() {
        let mut config = config_in(Path::new("/srv/eco"));
        assert_eq!(config.log_file_path(), Path::new("/srv/eco/ecowatch.log"));

        config.logging.file = PathBuf::from("/var/log/eco.log");
        assert_eq!(config.log_file_path(), Path::new("/var/log/eco.log"));
    }
}
