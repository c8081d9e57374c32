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

//! Persisted tool path overrides and behavior settings.
//!
//! The configuration is advisory: loading never fails. A missing or broken
//! document yields the defaults, and the [`ConfigLoadOutcome`] records which
//! of the two happened.

mod store;

pub use store::ConfigStore;

use crate::error::{Result, ScError};
use crate::tools::Tool;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Explicit path overrides, one slot per known tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub sc_downgrade: Option<PathBuf>,
    pub sctx_converter: Option<PathBuf>,
    pub pvr_tex_tool: Option<PathBuf>,
    pub sc_tex: Option<PathBuf>,
}

impl ToolPaths {
    pub fn get(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::ScDowngrade => self.sc_downgrade.as_deref(),
            Tool::SctxConverter => self.sctx_converter.as_deref(),
            Tool::PvrTexTool => self.pvr_tex_tool.as_deref(),
            Tool::ScTex => self.sc_tex.as_deref(),
        }
    }

    pub fn set(&mut self, tool: Tool, path: Option<PathBuf>) {
        let slot = match tool {
            Tool::ScDowngrade => &mut self.sc_downgrade,
            Tool::SctxConverter => &mut self.sctx_converter,
            Tool::PvrTexTool => &mut self.pvr_tex_tool,
            Tool::ScTex => &mut self.sc_tex,
        };
        *slot = path;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run Windows binaries through Wine on macOS and Linux.
    pub use_wine: bool,
    pub prefer_native: bool,
    pub verbose: bool,
    pub auto_download_tools: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_wine: true,
            prefer_native: true,
            verbose: false,
            auto_download_tools: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tool_paths: ToolPaths,
    pub settings: Settings,
}

/// How [`Config::load_with_outcome`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLoadOutcome {
    Loaded,
    DefaultedMissing,
    DefaultedCorrupt,
}

impl Config {
    /// Load the configuration, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        Self::load_with_outcome(path).0
    }

    pub fn load_with_outcome(path: &Path) -> (Self, ConfigLoadOutcome) {
        if !path.exists() {
            debug!("Config file not found at {path:?}, using defaults");
            return (Self::default(), ConfigLoadOutcome::DefaultedMissing);
        }

        let parsed = fs::read_to_string(path)
            .map_err(ScError::from)
            .and_then(|contents| serde_json::from_str::<Config>(&contents).map_err(ScError::from));

        match parsed {
            Ok(config) => {
                debug!("Loaded config from {path:?}");
                (config, ConfigLoadOutcome::Loaded)
            }
            Err(e) => {
                warn!("Ignoring unreadable config file {}: {e}", path.display());
                (Self::default(), ConfigLoadOutcome::DefaultedCorrupt)
            }
        }
    }

    /// Write the configuration, replacing the target file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ScError::ConfigError(format!("Failed to serialize config: {e}")))?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| {
            ScError::ConfigError(format!("Failed to write {}: {}", path.display(), e.error))
        })?;

        debug!("Saved config to {path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG_FILE_NAME: &str = "sc2fla_config.json";

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.use_wine);
        assert!(config.settings.prefer_native);
        assert!(!config.settings.verbose);
        assert!(!config.settings.auto_download_tools);
        for tool in Tool::ALL {
            assert_eq!(config.tool_paths.get(tool), None);
        }
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let (config, outcome) =
            Config::load_with_outcome(&temp_dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(config, Config::default());
        assert_eq!(outcome, ConfigLoadOutcome::DefaultedMissing);
    }

    #[test]
    fn test_load_corrupt_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ \"settings\": { \"use_wine\": ").unwrap();

        let (config, outcome) = Config::load_with_outcome(&path);
        assert_eq!(config, Config::default());
        assert_eq!(outcome, ConfigLoadOutcome::DefaultedCorrupt);
    }

    #[test]
    fn test_load_wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "settings": { "use_wine": "yes" } }"#).unwrap();

        let (config, outcome) = Config::load_with_outcome(&path);
        assert_eq!(config, Config::default());
        assert_eq!(outcome, ConfigLoadOutcome::DefaultedCorrupt);
    }

    #[test]
    fn test_partial_config_takes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{
  "tool_paths": { "sc_downgrade": "/opt/tools/ScDowngrade", "unknown_tool": "/x" },
  "settings": { "verbose": true },
  "extra": 42
}"#,
        )
        .unwrap();

        let (config, outcome) = Config::load_with_outcome(&path);
        assert_eq!(outcome, ConfigLoadOutcome::Loaded);
        assert_eq!(
            config.tool_paths.get(Tool::ScDowngrade),
            Some(Path::new("/opt/tools/ScDowngrade"))
        );
        assert_eq!(config.tool_paths.sctx_converter, None);
        assert!(config.settings.verbose);
        assert!(config.settings.use_wine);
        assert!(config.settings.prefer_native);
        assert!(!config.settings.auto_download_tools);
    }

    #[test]
    fn test_null_tool_paths_are_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{ "tool_paths": { "sc_downgrade": null, "sc_tex": null }, "settings": {} }"#,
        )
        .unwrap();

        let (config, outcome) = Config::load_with_outcome(&path);
        assert_eq!(outcome, ConfigLoadOutcome::Loaded);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        Config::default().save(&path).unwrap();
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn test_save_and_load_fully_overridden_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        for tool in Tool::ALL {
            config
                .tool_paths
                .set(tool, Some(PathBuf::from(format!("/opt/{}", tool.binary_name()))));
        }
        config.settings = Settings {
            use_wine: false,
            prefer_native: false,
            verbose: true,
            auto_download_tools: true,
        };

        config.save(&path).unwrap();
        let (loaded, outcome) = Config::load_with_outcome(&path);
        assert_eq!(outcome, ConfigLoadOutcome::Loaded);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_saved_document_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        Config::default().save(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value["tool_paths"]["sc_downgrade"].is_null());
        assert!(value["tool_paths"]["pvr_tex_tool"].is_null());
        assert_eq!(value["settings"]["use_wine"], serde_json::Value::Bool(true));
        assert_eq!(
            value["settings"]["auto_download_tools"],
            serde_json::Value::Bool(false)
        );
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "garbage").unwrap();

        let mut config = Config::default();
        config.settings.verbose = true;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path), config);
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
