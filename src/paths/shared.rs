// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Result, ScError};
use std::fs;
use std::path::{Path, PathBuf};

/// Ensure the provided path exists, returning it on success.
pub fn ensure_directory(path: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&path).map_err(|error| {
        ScError::ConfigError(format!(
            "Failed to create directory {}: {error}",
            path.display()
        ))
    })?;
    Ok(path)
}

/// Join a single directory segment onto the root and ensure the resulting path exists.
pub fn ensure_child_directory(root: &Path, child: &str) -> Result<PathBuf> {
    ensure_directory(root.join(child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn ensure_directory_creates_nested_path() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("lib").join("bin").join("linux");

        let created = ensure_directory(target.clone()).unwrap();
        assert_eq!(created, target);
        assert!(target.is_dir());

        // Idempotent on an existing directory.
        ensure_directory(target.clone()).unwrap();
    }

    #[test]
    fn ensure_directory_reports_blocking_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("lib");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = ensure_child_directory(&blocker, "bin").unwrap_err();
        assert!(matches!(err, ScError::ConfigError(msg) if msg.contains("Failed to create")));
    }
}
