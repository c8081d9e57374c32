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

//! Detection of the Wine compatibility layer used to run Windows tools on
//! macOS and Linux.

use log::debug;
use std::path::{Path, PathBuf};
use which::which;

/// Launcher for 64-bit Windows executables.
pub const WINE64_COMMAND: &str = "wine64";
/// Launcher for 32-bit (and, on newer Wine releases, all) Windows executables.
pub const WINE_COMMAND: &str = "wine";

/// The Wine launchers found on this host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatLayer {
    wine64: Option<PathBuf>,
    wine: Option<PathBuf>,
}

impl CompatLayer {
    /// Search `PATH` for the Wine launchers.
    pub fn detect() -> Self {
        let wine64 = which(WINE64_COMMAND).ok();
        let wine = which(WINE_COMMAND).ok();
        debug!("Wine launchers: wine64={wine64:?}, wine={wine:?}");
        Self { wine64, wine }
    }

    /// A layer with explicitly chosen launchers.
    pub fn with_launchers(wine64: Option<PathBuf>, wine: Option<PathBuf>) -> Self {
        Self { wine64, wine }
    }

    /// A layer with no launchers at all.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_available(&self) -> bool {
        self.wine64.is_some() || self.wine.is_some()
    }

    /// The launcher to prefix commands with, preferring the 64-bit variant.
    pub fn launcher(&self) -> Option<&Path> {
        self.wine64.as_deref().or(self.wine.as_deref())
    }
}

/// Check if Wine is installed and available.
pub fn is_compat_shim_available() -> bool {
    CompatLayer::detect().is_available()
}
