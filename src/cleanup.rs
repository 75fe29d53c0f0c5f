//! Age-based removal of old session directories

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, error, info, warn};

/// Session directories untouched for longer than this are removed
pub const MAX_AGE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct Sweeper {
    root: PathBuf,
    max_age: Duration,
}

impl Sweeper {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_age: MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Sweep on the blocking pool
    pub async fn run(&self) -> usize {
        let sweeper = self.clone();
        match tokio::task::spawn_blocking(move || sweeper.sweep()).await {
            Ok(removed) => removed,
            Err(e) => {
                error!("Cleanup task failed: {}", e);
                0
            }
        }
    }

    /// Remove stale directories; returns how many were deleted
    pub fn sweep(&self) -> usize {
        self.sweep_at(SystemTime::now())
    }

    pub fn sweep_at(&self, now: SystemTime) -> usize {
        let threshold = now.checked_sub(self.max_age).unwrap_or(SystemTime::UNIX_EPOCH);

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list {}: {}", self.root.display(), e);
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Cannot read entry in {}: {}", self.root.display(), e);
                    continue;
                }
            };
            match remove_if_stale(&path, threshold) {
                Ok(true) => {
                    info!("Removed old session directory {}", path.display());
                    removed += 1;
                }
                Ok(false) => debug!("Keeping {}", path.display()),
                Err(e) => warn!("Cleanup of {} failed: {:#}", path.display(), e),
            }
        }

        removed
    }
}

fn remove_if_stale(path: &Path, threshold: SystemTime) -> Result<bool> {
    let metadata = fs::metadata(path).context("Failed to stat")?;
    if !metadata.is_dir() {
        return Ok(false);
    }

    let modified = metadata.modified().context("No modification time")?;
    if modified >= threshold {
        return Ok(false);
    }

    fs::remove_dir_all(path).context("Failed to remove")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn backdate(path: &Path, age: Duration) {
        let file = File::open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_removes_only_stale_directories() {
        let root = TempDir::new().unwrap();
        let old = root.path().join("2025-10-27_13-00_aaaaaaaa");
        let fresh = root.path().join("2025-10-27_13-30_bbbbbbbb");
        fs::create_dir_all(old.join("tracks")).unwrap();
        fs::write(old.join("tracks/alice.wav"), b"RIFF").unwrap();
        fs::create_dir(&fresh).unwrap();

        backdate(&old, Duration::from_secs(61 * 60));
        backdate(&fresh, Duration::from_secs(30 * 60));

        let removed = Sweeper::new(root.path()).sweep();

        assert_eq!(removed, 1);
        assert!(!old.exists());
        assert!(fresh.exists());
    }

    #[test]
    fn test_ignores_plain_files() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("notes.txt");
        fs::write(&file, b"keep").unwrap();
        backdate(&file, Duration::from_secs(2 * 60 * 60));

        assert_eq!(Sweeper::new(root.path()).sweep(), 0);
        assert!(file.exists());
    }

    #[test]
    fn test_missing_root_is_not_an_error() {
        let root = TempDir::new().unwrap();
        let sweeper = Sweeper::new(root.path().join("missing"));
        assert_eq!(sweeper.sweep(), 0);
    }

    #[tokio::test]
    async fn test_run_sweeps_on_blocking_pool() {
        let root = TempDir::new().unwrap();
        let old = root.path().join("2025-10-27_12-00_cccccccc");
        fs::create_dir(&old).unwrap();
        backdate(&old, Duration::from_secs(2 * 60 * 60));

        assert_eq!(Sweeper::new(root.path()).run().await, 1);
        assert!(!old.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unremovable_directory_does_not_stop_sweep() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let locked = root.path().join("a-locked");
        let stale = root.path().join("b-stale");
        fs::create_dir_all(locked.join("inner")).unwrap();
        fs::write(locked.join("inner/track.wav"), b"RIFF").unwrap();
        fs::create_dir(&stale).unwrap();
        backdate(&locked, Duration::from_secs(2 * 60 * 60));
        backdate(&stale, Duration::from_secs(2 * 60 * 60));
        fs::set_permissions(locked.join("inner"), fs::Permissions::from_mode(0o555)).unwrap();

        let removed = Sweeper::new(root.path()).sweep();

        // Restore so TempDir can clean up
        fs::set_permissions(locked.join("inner"), fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!stale.exists());
        if locked.exists() {
            assert_eq!(removed, 1);
        } else {
            // running as root ignores the permission bits
            assert_eq!(removed, 2);
        }
    }

    #[test]
    fn test_custom_max_age() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("session");
        fs::create_dir(&dir).unwrap();
        backdate(&dir, Duration::from_secs(10 * 60));

        let sweeper = Sweeper::new(root.path()).with_max_age(Duration::from_secs(5 * 60));
        assert_eq!(sweeper.sweep(), 1);
    }
}
