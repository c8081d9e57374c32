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
use crate::config::ConfigLoadOutcome;
use crate::error::Result;
use crate::platform::{OperatingSystem, PlatformInfo, is_emulation_available};
use crate::tools::{ExecutionMode, Tool, ToolInfo};
use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

/// `--platform`, `--tools` and `--config` reports.
pub struct StatusCommand<'a> {
    ctx: &'a AppContext,
}

impl<'a> StatusCommand<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub fn show_platform(&self) -> Result<()> {
        let platform = PlatformInfo::current();
        let compat = self.ctx.planner().compat();

        println!("{}", "Platform information:".bold());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Property", "Value"]);
        table.add_row(vec!["Operating system".to_string(), platform.os.to_string()]);
        table.add_row(vec!["Architecture".to_string(), platform.arch.to_string()]);
        table.add_row(vec!["64-bit".to_string(), yes_no(platform.is_64bit)]);
        table.add_row(vec!["OS version".to_string(), platform.os_version.clone()]);
        if !platform.os.is_windows() {
            let wine = match compat.launcher() {
                Some(path) => path.display().to_string().green().to_string(),
                None => "not installed".yellow().to_string(),
            };
            table.add_row(vec!["Wine".to_string(), wine]);
        }
        if platform.os == OperatingSystem::MacOs {
            table.add_row(vec![
                "Rosetta 2".to_string(),
                yes_no(is_emulation_available()),
            ]);
        }
        table.add_row(vec![
            "Home".to_string(),
            self.ctx.home().display().to_string(),
        ]);

        println!("{table}");
        Ok(())
    }

    pub fn show_tools(&self) -> Result<()> {
        let planner = self.ctx.planner();
        let config = self.ctx.store().get();

        println!("{}", "Tool status:".bold());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Tool", "Status", "Mode", "Path"]);

        let mut available = 0;
        for tool in Tool::ALL {
            let info = planner.plan_execution(&tool.into(), Some(config.as_ref()));
            if info.available() {
                available += 1;
            }
            table.add_row(vec![
                tool.binary_name().to_string(),
                status_label(&info),
                info.execution_mode.to_string(),
                info.path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }

        println!("{table}");
        println!();
        println!(
            "Available: {} of {}",
            available.to_string().bold(),
            Tool::ALL.len()
        );

        if available < Tool::ALL.len() {
            println!();
            println!("Search order for missing tools:");
            for tool in Tool::ALL {
                if planner
                    .locator()
                    .find_tool(&tool.into(), Some(config.as_ref()))
                    .is_some()
                {
                    continue;
                }
                println!("  {} - {}", tool.binary_name().cyan(), tool.description());
                for candidate in planner.locator().candidates(&tool.into(), Some(config.as_ref())) {
                    println!(
                        "    {:<16} {}",
                        candidate.source.label(),
                        candidate.path.display()
                    );
                }
            }
        }
        Ok(())
    }

    pub fn show_config(&self) -> Result<()> {
        let store = self.ctx.store();
        let config = store.get();

        println!("{}", "Configuration:".bold());
        println!();
        println!("  File:   {}", store.path().display());
        println!("  Status: {}", outcome_label(store.outcome()));
        println!();

        let mut settings = Table::new();
        settings.load_preset(UTF8_FULL);
        settings.set_header(vec!["Setting", "Value"]);
        settings.add_row(vec!["use_wine".to_string(), config.settings.use_wine.to_string()]);
        settings.add_row(vec![
            "prefer_native".to_string(),
            config.settings.prefer_native.to_string(),
        ]);
        settings.add_row(vec!["verbose".to_string(), config.settings.verbose.to_string()]);
        settings.add_row(vec![
            "auto_download_tools".to_string(),
            config.settings.auto_download_tools.to_string(),
        ]);
        println!("{settings}");
        println!();

        let mut paths = Table::new();
        paths.load_preset(UTF8_FULL);
        paths.set_header(vec!["Tool", "Path override"]);
        for tool in Tool::ALL {
            let value = match config.tool_paths.get(tool) {
                Some(path) if path.exists() => path.display().to_string(),
                Some(path) => format!("{} {}", path.display(), "(missing)".red()),
                None => "-".to_string(),
            };
            paths.add_row(vec![tool.id().to_string(), value]);
        }
        println!("{paths}");
        Ok(())
    }
}

fn yes_no(value: bool) -> String {
    let label = if value { "yes" } else { "no" };
    label.to_string()
}

fn status_label(info: &ToolInfo) -> String {
    match (info.path.is_some(), info.execution_mode) {
        (false, _) => "✗ Missing".red().to_string(),
        (true, ExecutionMode::Unavailable) => "⚠ Needs Wine".yellow().to_string(),
        (true, _) => "✓ Available".green().to_string(),
    }
}

fn outcome_label(outcome: ConfigLoadOutcome) -> String {
    match outcome {
        ConfigLoadOutcome::Loaded => "loaded".green().to_string(),
        ConfigLoadOutcome::DefaultedMissing => "not found, using defaults".yellow().to_string(),
        ConfigLoadOutcome::DefaultedCorrupt => "unreadable, using defaults".red().to_string(),
    }
}
