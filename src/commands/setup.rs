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

use super::AppContext;
use super::status::StatusCommand;
use crate::config::{Config, ConfigLoadOutcome};
use crate::error::Result;
use crate::installer::{AssetStatus, Installer};
use crate::paths::home;
use crate::platform::PlatformInfo;
use crate::tools::{Tool, wine_install_hint};
use colored::Colorize;
use log::debug;

const PVR_TEX_TOOL_URL: &str =
    "https://developer.imaginationtech.com/solutions/pvrtextool/";

pub struct SetupCommand<'a> {
    ctx: &'a AppContext,
    installer: Installer,
}

impl<'a> SetupCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self::with_installer(ctx, Installer::new(ctx.home()))
    }

    pub fn with_installer(ctx: &'a AppContext, installer: Installer) -> Self {
        Self { ctx, installer }
    }

    pub fn execute(&self, download: bool) -> Result<()> {
        operation("Setting up", "SC2FLA");

        // Step 1: Create directories
        self.create_directories()?;

        // Step 2: Move tools from older layouts
        self.migrate_legacy_tools()?;

        // Step 3: Write a default config if none exists
        self.write_default_config()?;

        // Step 4: Fetch published Windows tools
        if download {
            self.download_tools();
        }

        // Step 5: Report what still needs manual attention
        self.check_wine();
        self.check_pvr_tex_tool();

        success("Setup completed");
        println!();
        StatusCommand::new(self.ctx).show_tools()
    }

    fn create_directories(&self) -> Result<()> {
        step("Creating directories");
        let existed: Vec<bool> = home::PLATFORM_BIN_DIRS
            .iter()
            .map(|os| home::platform_bin_dir(self.ctx.home(), *os).exists())
            .collect();

        home::ensure_home(self.ctx.home())?;
        let dirs = self.installer.ensure_bin_directories()?;
        for (dir, existed) in dirs.iter().zip(existed) {
            let label = if existed { "Exists" } else { "Created" };
            step(&format!("{label}: {}", dir.display()));
        }
        Ok(())
    }

    fn migrate_legacy_tools(&self) -> Result<()> {
        let migrated = self.installer.migrate_legacy_tools()?;
        if migrated.is_empty() {
            debug!("No legacy tools to migrate");
            return Ok(());
        }
        step("Migrating legacy tools");
        for path in migrated {
            step(&format!("Migrated: {}", path.display()));
        }
        Ok(())
    }

    fn write_default_config(&self) -> Result<()> {
        let store = self.ctx.store();
        match store.outcome() {
            ConfigLoadOutcome::DefaultedMissing => {
                store.save(Config::default())?;
                step(&format!("Created: {}", store.path().display()));
            }
            ConfigLoadOutcome::DefaultedCorrupt => {
                warning(&format!(
                    "{} could not be read and was left untouched",
                    store.path().display()
                ));
            }
            ConfigLoadOutcome::Loaded => {
                step(&format!("Exists: {}", store.path().display()));
            }
        }
        Ok(())
    }

    fn download_tools(&self) {
        step("Downloading Windows tools");
        for (tool, result) in self.installer.download_windows_tools() {
            match result {
                Ok(statuses) if statuses.is_empty() => {
                    warning(&format!("No assets found for {}", tool.binary_name()));
                }
                Ok(statuses) => {
                    for status in statuses {
                        match status {
                            AssetStatus::Downloaded(path) => {
                                step(&format!("Downloaded: {}", path.display()))
                            }
                            AssetStatus::AlreadyPresent(path) => {
                                step(&format!("Exists: {}", path.display()))
                            }
                        }
                    }
                }
                Err(e) => warning(&format!("Failed to download {}: {e}", tool.binary_name())),
            }
        }
    }

    fn check_wine(&self) {
        let platform = PlatformInfo::current();
        if platform.os.is_windows() {
            return;
        }
        match self.ctx.planner().compat().launcher() {
            Some(launcher) => step(&format!("Wine: {}", launcher.display())),
            None => {
                warning("Wine is not installed; Windows tools cannot run");
                step(wine_install_hint(platform.os));
            }
        }
    }

    fn check_pvr_tex_tool(&self) {
        let config = self.ctx.store().get();
        let found = self
            .ctx
            .planner()
            .locator()
            .find_tool(&Tool::PvrTexTool.into(), Some(config.as_ref()));
        if let Some(path) = found {
            step(&format!("PVRTexToolCLI: {}", path.display()));
            return;
        }
        warning("PVRTexToolCLI is not bundled and must be installed manually");
        step(&format!("Download it from {PVR_TEX_TOOL_URL}"));
        step(&format!(
            "Place it in {} or set tool_paths.pvr_tex_tool",
            home::platform_bin_dir(self.ctx.home(), PlatformInfo::current().os).display()
        ));
    }
}

fn operation(operation: &str, context: &str) {
    println!("{operation} {context}...");
}

fn step(message: &str) {
    println!("  {message}");
}

fn success(message: &str) {
    println!("{} {message}", "✓".green());
}

fn warning(message: &str) {
    println!("  {} {message}", "⚠".yellow());
}
