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

use super::registry::{Tool, ToolName};
use crate::config::Config;
use crate::paths::home;
use crate::platform::{OperatingSystem, WINDOWS_EXTENSION, binary_extension};
use log::{debug, trace};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Where a candidate path came from in the search order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    ConfigOverride,
    PlatformBin,
    WindowsBin,
    Legacy,
    UserScripts,
}

impl CandidateSource {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateSource::ConfigOverride => "config override",
            CandidateSource::PlatformBin => "platform bin",
            CandidateSource::WindowsBin => "windows bin",
            CandidateSource::Legacy => "legacy lib",
            CandidateSource::UserScripts => "user scripts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: CandidateSource,
    pub path: PathBuf,
}

/// Finds tool binaries under the toolkit home.
#[derive(Debug, Clone)]
pub struct Locator {
    home: PathBuf,
    host_os: OperatingSystem,
}

impl Locator {
    pub fn new(home: impl Into<PathBuf>, host_os: OperatingSystem) -> Self {
        Self {
            home: home.into(),
            host_os,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn host_os(&self) -> OperatingSystem {
        self.host_os
    }

    /// Every path probed for `name`, highest priority first.
    pub fn candidates(&self, name: &ToolName, config: Option<&Config>) -> Vec<Candidate> {
        let canonical = name.canonical_name();
        let mut candidates = Vec::with_capacity(5);

        if let (Some(config), Some(tool)) = (config, name.known())
            && let Some(path) = config.tool_paths.get(tool)
        {
            candidates.push(Candidate {
                source: CandidateSource::ConfigOverride,
                path: path.to_path_buf(),
            });
        }

        let native_name = format!("{canonical}{}", binary_extension(self.host_os));
        candidates.push(Candidate {
            source: CandidateSource::PlatformBin,
            path: home::platform_bin_dir(&self.home, self.host_os).join(native_name),
        });

        let windows_name = format!("{canonical}{WINDOWS_EXTENSION}");
        if !self.host_os.is_windows() {
            candidates.push(Candidate {
                source: CandidateSource::WindowsBin,
                path: home::windows_bin_dir(&self.home).join(&windows_name),
            });
        }
        candidates.push(Candidate {
            source: CandidateSource::Legacy,
            path: home::legacy_dir(&self.home).join(&windows_name),
        });
        candidates.push(Candidate {
            source: CandidateSource::UserScripts,
            path: home::user_scripts_dir(&self.home).join(&windows_name),
        });

        candidates
    }

    /// First existing candidate for `name`, if any.
    pub fn find_tool(&self, name: &ToolName, config: Option<&Config>) -> Option<PathBuf> {
        for candidate in self.candidates(name, config) {
            trace!(
                "Checking {} candidate for {name}: {}",
                candidate.source.label(),
                candidate.path.display()
            );
            if candidate.path.exists() {
                debug!("Found {name} at {}", candidate.path.display());
                return Some(candidate.path);
            }
        }
        debug!("Tool {name} not found in any search location");
        None
    }

    pub fn find_all_tools(&self, config: Option<&Config>) -> BTreeMap<Tool, Option<PathBuf>> {
        Tool::ALL
            .into_iter()
            .map(|tool| (tool, self.find_tool(&ToolName::Known(tool), config)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fixtures::touch;
    use tempfile::TempDir;

    fn all_levels(home: &Path, tool: Tool, host_os: OperatingSystem) -> Vec<PathBuf> {
        let name = tool.binary_name();
        let mut paths = vec![
            home.join("override").join(name),
            home::platform_bin_dir(home, host_os)
                .join(format!("{name}{}", binary_extension(host_os))),
        ];
        if !host_os.is_windows() {
            paths.push(home::windows_bin_dir(home).join(format!("{name}.exe")));
        }
        paths.push(home::legacy_dir(home).join(format!("{name}.exe")));
        paths.push(home::user_scripts_dir(home).join(format!("{name}.exe")));
        paths
    }

    fn config_with_override(tool: Tool, path: &Path) -> Config {
        let mut config = Config::default();
        config.tool_paths.set(tool, Some(path.to_path_buf()));
        config
    }

    #[test]
    fn test_candidates_on_linux() {
        let locator = Locator::new("/h", OperatingSystem::Linux);
        let paths: Vec<_> = locator
            .candidates(&Tool::ScDowngrade.into(), None)
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/h/lib/bin/linux/ScDowngrade"),
                PathBuf::from("/h/lib/bin/windows/ScDowngrade.exe"),
                PathBuf::from("/h/lib/ScDowngrade.exe"),
                PathBuf::from("/h/user-scripts/ScDowngrade.exe"),
            ]
        );
    }

    #[test]
    fn test_candidates_on_windows_skip_windows_bin_step() {
        let locator = Locator::new("/h", OperatingSystem::Windows);
        let sources: Vec<_> = locator
            .candidates(&Tool::PvrTexTool.into(), None)
            .into_iter()
            .map(|c| (c.source, c.path))
            .collect();
        assert_eq!(
            sources,
            vec![
                (
                    CandidateSource::PlatformBin,
                    PathBuf::from("/h/lib/bin/windows/PVRTexToolCLI.exe")
                ),
                (
                    CandidateSource::Legacy,
                    PathBuf::from("/h/lib/PVRTexToolCLI.exe")
                ),
                (
                    CandidateSource::UserScripts,
                    PathBuf::from("/h/user-scripts/PVRTexToolCLI.exe")
                ),
            ]
        );
    }

    #[test]
    fn test_candidates_include_override_first() {
        let locator = Locator::new("/h", OperatingSystem::MacOs);
        let config = config_with_override(Tool::SctxConverter, Path::new("/opt/sctx"));
        let candidates = locator.candidates(&Tool::SctxConverter.into(), Some(&config));
        assert_eq!(candidates[0].source, CandidateSource::ConfigOverride);
        assert_eq!(candidates[0].path, PathBuf::from("/opt/sctx"));
        assert_eq!(
            candidates[1].path,
            PathBuf::from("/h/lib/bin/macos/SctxConverter")
        );
    }

    #[test]
    fn test_custom_name_uses_name_as_canonical() {
        let locator = Locator::new("/h", OperatingSystem::Linux);
        let candidates = locator.candidates(&ToolName::from("texconv"), None);
        assert_eq!(
            candidates[0].path,
            PathBuf::from("/h/lib/bin/linux/texconv")
        );
        assert_eq!(
            candidates[2].path,
            PathBuf::from("/h/lib/texconv.exe")
        );
    }

    #[test]
    fn test_unknown_os_uses_unknown_dir() {
        let locator = Locator::new("/h", OperatingSystem::Unknown);
        let candidates = locator.candidates(&Tool::ScTex.into(), None);
        assert_eq!(candidates[0].path, PathBuf::from("/h/lib/bin/unknown/SCTex"));
    }

    #[test]
    fn test_highest_priority_level_wins() {
        for host_os in [
            OperatingSystem::Windows,
            OperatingSystem::MacOs,
            OperatingSystem::Linux,
        ] {
            for tool in Tool::ALL {
                let temp = TempDir::new().unwrap();
                let home = temp.path();
                let levels = all_levels(home, tool, host_os);
                let config = config_with_override(tool, &levels[0]);
                let locator = Locator::new(home, host_os);

                // Populate from the lowest priority upwards; each new level must win.
                for (index, level) in levels.iter().enumerate().rev() {
                    touch(level);
                    let found = locator.find_tool(&tool.into(), Some(&config));
                    assert_eq!(
                        found.as_deref(),
                        Some(level.as_path()),
                        "{host_os} {tool} level {index}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_missing_override_falls_through() {
        let temp = TempDir::new().unwrap();
        let home = temp.path();
        let legacy = home::legacy_dir(home).join("ScDowngrade.exe");
        touch(&legacy);

        let config = config_with_override(Tool::ScDowngrade, &home.join("nope"));
        let locator = Locator::new(home, OperatingSystem::Linux);
        assert_eq!(
            locator.find_tool(&Tool::ScDowngrade.into(), Some(&config)),
            Some(legacy)
        );
    }

    #[test]
    fn test_nothing_present_is_not_found() {
        let temp = TempDir::new().unwrap();
        let locator = Locator::new(temp.path(), OperatingSystem::Linux);
        assert_eq!(locator.find_tool(&Tool::ScDowngrade.into(), None), None);
    }

    #[test]
    fn test_find_all_tools_reports_partial_results() {
        let temp = TempDir::new().unwrap();
        let home = temp.path();
        let sctx = home::user_scripts_dir(home).join("SctxConverter.exe");
        touch(&sctx);

        let locator = Locator::new(home, OperatingSystem::MacOs);
        let found = locator.find_all_tools(None);

        assert_eq!(found.len(), Tool::ALL.len());
        assert_eq!(found[&Tool::SctxConverter], Some(sctx));
        assert_eq!(found[&Tool::ScDowngrade], None);
        assert_eq!(found[&Tool::PvrTexTool], None);
        assert_eq!(found[&Tool::ScTex], None);
    }
}
