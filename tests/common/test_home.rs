use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary toolkit home, removed when the guard is dropped.
pub struct TestHomeGuard {
    dir: TempDir,
}

impl TestHomeGuard {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create test home directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn sc2fla_home(&self) -> PathBuf {
        self.dir.path().join(".sc2fla")
    }

    pub fn windows_bin(&self) -> PathBuf {
        self.sc2fla_home().join("lib").join("bin").join("windows")
    }

    pub fn host_bin(&self) -> PathBuf {
        let os = if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else {
            "linux"
        };
        self.sc2fla_home().join("lib").join("bin").join(os)
    }

    pub fn config_file(&self) -> PathBuf {
        self.sc2fla_home().join("sc2fla_config.json")
    }

    pub fn assets_dir(&self) -> PathBuf {
        let dir = self.dir.path().join("assets");
        fs::create_dir_all(&dir).expect("Failed to create assets directory");
        dir
    }

    pub fn setup_sc2fla_structure(&self) -> &Self {
        for dir in [self.windows_bin(), self.host_bin()] {
            fs::create_dir_all(dir).expect("Failed to create bin directory");
        }
        self
    }

    pub fn write_config(&self, json: &str) -> &Self {
        fs::create_dir_all(self.sc2fla_home()).expect("Failed to create home directory");
        fs::write(self.config_file(), json).expect("Failed to write config");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_and_cleans_up_directory() {
        let test_path = {
            let guard = TestHomeGuard::new();
            let path = guard.path().to_path_buf();
            assert!(path.exists());
            path
        };
        assert!(!test_path.exists());
    }

    #[test]
    fn test_setup_sc2fla_structure() {
        let guard = TestHomeGuard::new();
        guard.setup_sc2fla_structure();
        assert!(guard.windows_bin().is_dir());
        assert!(guard.host_bin().is_dir());
    }
}
