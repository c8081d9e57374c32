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

use super::locator::Locator;
use super::registry::ToolName;
use crate::config::{Config, ConfigStore};
use crate::platform::{CompatLayer, OperatingSystem, PlatformInfo, is_windows_binary};
use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How a resolved tool can be launched on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Native,
    CompatShim,
    Unavailable,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Native => "native",
            ExecutionMode::CompatShim => "wine",
            ExecutionMode::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution result for one tool. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: ToolName,
    pub path: Option<PathBuf>,
    pub execution_mode: ExecutionMode,
    pub is_windows_binary: bool,
    pub host_os: OperatingSystem,
}

impl ToolInfo {
    pub fn available(&self) -> bool {
        self.path.is_some() && self.execution_mode != ExecutionMode::Unavailable
    }
}

/// Decide how a located binary can run.
///
/// A Windows binary on a non-Windows host runs only when Wine is both
/// enabled in the settings and installed.
pub fn decide_mode(
    host_os: OperatingSystem,
    is_windows_binary: bool,
    use_wine: bool,
    shim_available: bool,
) -> ExecutionMode {
    match (host_os.is_windows(), is_windows_binary, use_wine, shim_available) {
        (true, _, _, _) => ExecutionMode::Native,
        (false, false, _, _) => ExecutionMode::Native,
        (false, true, false, _) => ExecutionMode::Unavailable,
        (false, true, true, false) => ExecutionMode::Unavailable,
        (false, true, true, true) => ExecutionMode::CompatShim,
    }
}

/// Combines the locator, the compatibility layer and the settings.
#[derive(Debug, Clone)]
pub struct Planner {
    locator: Locator,
    // None: look Wine up again on every query.
    compat: Option<CompatLayer>,
    store: Arc<ConfigStore>,
}

impl Planner {
    /// A planner with a fixed compatibility layer.
    pub fn new(locator: Locator, compat: CompatLayer, store: Arc<ConfigStore>) -> Self {
        Self {
            locator,
            compat: Some(compat),
            store,
        }
    }

    /// A planner for this host, searching under `home`. Wine is detected
    /// on each query, so installing or removing it mid-run is picked up.
    pub fn detect(home: impl Into<PathBuf>, store: Arc<ConfigStore>) -> Self {
        let platform = PlatformInfo::current();
        Self {
            locator: Locator::new(home, platform.os),
            compat: None,
            store,
        }
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// The compatibility layer as of now.
    pub fn compat(&self) -> CompatLayer {
        match &self.compat {
            Some(compat) => compat.clone(),
            None => CompatLayer::detect(),
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// Resolve `name` against `config`, or the store's current snapshot.
    pub fn plan_execution(&self, name: &ToolName, config: Option<&Config>) -> ToolInfo {
        let snapshot;
        let config = match config {
            Some(config) => config,
            None => {
                snapshot = self.store.get();
                &*snapshot
            }
        };

        let host_os = self.locator.host_os();
        let Some(path) = self.locator.find_tool(name, Some(config)) else {
            return ToolInfo {
                name: name.clone(),
                path: None,
                execution_mode: ExecutionMode::Unavailable,
                is_windows_binary: false,
                host_os,
            };
        };

        let windows_binary = is_windows_binary(&path);
        let mode = decide_mode(
            host_os,
            windows_binary,
            config.settings.use_wine,
            self.compat().is_available(),
        );
        debug!("Planned {name} at {} as {mode}", path.display());

        ToolInfo {
            name: name.clone(),
            path: Some(path),
            execution_mode: mode,
            is_windows_binary: windows_binary,
            host_os,
        }
    }

    pub fn home(&self) -> &Path {
        self.locator.home()
    }
}
