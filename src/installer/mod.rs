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

//! Preparing the toolkit home: bin directories, legacy tool migration and
//! downloads of published Windows tool builds.

mod release;

pub use release::{Release, ReleaseAsset, ReleaseClient};

use crate::error::{Result, ScError};
use crate::paths::home;
use crate::platform::is_windows_binary;
use crate::tools::Tool;
use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Windows binaries that older layouts kept in `lib/` or `user-scripts/`.
pub const LEGACY_TOOL_FILES: [&str; 5] = [
    "ScDowngrade.exe",
    "SctxConverter.exe",
    "SctxConverter-avx2.exe",
    "PVRTexToolCLI.exe",
    "SCTex.exe",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetStatus {
    Downloaded(PathBuf),
    AlreadyPresent(PathBuf),
}

pub struct Installer {
    home: PathBuf,
    client: ReleaseClient,
}

impl Installer {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self::with_client(home, ReleaseClient::new())
    }

    pub fn with_client(home: impl Into<PathBuf>, client: ReleaseClient) -> Self {
        Self {
            home: home.into(),
            client,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn ensure_bin_directories(&self) -> Result<Vec<PathBuf>> {
        home::ensure_bin_directories(&self.home)
    }

    /// Copy legacy Windows binaries into `lib/bin/windows` when missing there.
    ///
    /// `lib/` is searched before `user-scripts/`; the first hit wins.
    pub fn migrate_legacy_tools(&self) -> Result<Vec<PathBuf>> {
        let target_dir = home::windows_bin_dir(&self.home);
        fs::create_dir_all(&target_dir)?;
        let search_dirs = [
            home::legacy_dir(&self.home),
            home::user_scripts_dir(&self.home),
        ];

        let mut migrated = Vec::new();
        for file_name in LEGACY_TOOL_FILES {
            let Some(source) = search_dirs
                .iter()
                .map(|dir| dir.join(file_name))
                .find(|candidate| candidate.is_file())
            else {
                continue;
            };

            let dest = target_dir.join(file_name);
            if dest.exists() {
                debug!("{file_name} already present in {}", target_dir.display());
                continue;
            }
            fs::copy(&source, &dest)?;
            info!("Migrated {file_name}");
            migrated.push(dest);
        }
        Ok(migrated)
    }

    /// Download every Windows executable of the latest `tool` release.
    pub fn download_tool(&self, tool: Tool) -> Result<Vec<AssetStatus>> {
        let repository = tool.release_repository().ok_or_else(|| {
            ScError::Download(format!("{} has no published release", tool.binary_name()))
        })?;
        let release = self.client.latest_release(repository)?;
        let target_dir = home::windows_bin_dir(&self.home);
        fs::create_dir_all(&target_dir)?;

        let assets: Vec<_> = release
            .assets
            .iter()
            .filter(|asset| is_windows_binary(Path::new(&asset.name)))
            .collect();
        if assets.is_empty() {
            warn!("No Windows assets in {repository} {}", release.tag_name);
        }

        let mut statuses = Vec::with_capacity(assets.len());
        for asset in assets {
            let dest = target_dir.join(safe_file_name(&asset.name)?);
            if dest.exists() {
                info!("{} already exists", asset.name);
                statuses.push(AssetStatus::AlreadyPresent(dest));
                continue;
            }

            info!("Downloading {}", asset.name);
            let bytes = self.client.download(&asset.browser_download_url)?;
            write_executable(&dest, &bytes)?;
            info!("{} downloaded", asset.name);
            statuses.push(AssetStatus::Downloaded(dest));
        }
        Ok(statuses)
    }

    /// Download all tools with published releases, continuing past failures.
    pub fn download_windows_tools(&self) -> Vec<(Tool, Result<Vec<AssetStatus>>)> {
        Tool::ALL
            .into_iter()
            .filter(|tool| tool.release_repository().is_some())
            .map(|tool| (tool, self.download_tool(tool)))
            .collect()
    }
}

/// Reject asset names that would escape the target directory.
fn safe_file_name(name: &str) -> Result<&str> {
    let path = Path::new(name);
    match path.file_name() {
        Some(file_name) if file_name == path.as_os_str() => Ok(name),
        _ => Err(ScError::Download(format!("Refusing unsafe asset name '{name}'"))),
    }
}

fn write_executable(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| ScError::Download(format!("Invalid destination {}", dest.display())))?;
    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o755))?;
    }

    temp.persist(dest)
        .map_err(|e| ScError::Download(format!("Failed to write {}: {}", dest.display(), e.error)))?;
    Ok(())
}
