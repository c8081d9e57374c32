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

use crate::error::Result;
use crate::paths::shared::{ensure_child_directory, ensure_directory};
use crate::platform::OperatingSystem;
use std::path::{Path, PathBuf};

pub const LIB_DIR: &str = "lib";
pub const BIN_DIR: &str = "bin";
pub const USER_SCRIPTS_DIR: &str = "user-scripts";
pub const CONFIG_FILE_NAME: &str = "sc2fla_config.json";

/// Platform directories created under `lib/bin` by setup.
pub const PLATFORM_BIN_DIRS: [OperatingSystem; 3] = [
    OperatingSystem::Windows,
    OperatingSystem::MacOs,
    OperatingSystem::Linux,
];

/// `lib/`, which also serves as the flat legacy tool location.
pub fn lib_dir(home: &Path) -> PathBuf {
    home.join(LIB_DIR)
}

pub fn bin_dir(home: &Path) -> PathBuf {
    lib_dir(home).join(BIN_DIR)
}

pub fn platform_bin_dir(home: &Path, os: OperatingSystem) -> PathBuf {
    bin_dir(home).join(os.as_str())
}

/// Directory holding Windows builds that run through Wine elsewhere.
pub fn windows_bin_dir(home: &Path) -> PathBuf {
    platform_bin_dir(home, OperatingSystem::Windows)
}

pub fn legacy_dir(home: &Path) -> PathBuf {
    lib_dir(home)
}

pub fn user_scripts_dir(home: &Path) -> PathBuf {
    home.join(USER_SCRIPTS_DIR)
}

pub fn config_file(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}

pub fn ensure_home(home: &Path) -> Result<PathBuf> {
    ensure_directory(home.to_path_buf())
}

/// Create `lib/bin/{windows,macos,linux}`.
pub fn ensure_bin_directories(home: &Path) -> Result<Vec<PathBuf>> {
    let bin = ensure_directory(bin_dir(home))?;
    PLATFORM_BIN_DIRS
        .iter()
        .map(|os| ensure_child_directory(&bin, os.as_str()))
        .collect()
}
