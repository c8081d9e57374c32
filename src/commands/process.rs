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
use crate::convert::{AssetConverter, ConvertOptions};
use crate::downgrade::{Downgrader, Orchestrator, ToolDowngrader, Verdict};
use crate::error::{Result, ScError};
use crate::installer::Installer;
use crate::platform::{CompatLayer, PlatformInfo};
use crate::tools::{ExecutionMode, Tool, ToolInfo, unavailable_hint};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Texture containers are consumed alongside their `.sc` file.
const TEXTURE_SUFFIX: &str = "_tex.sc";
const SC_EXTENSION: &str = "sc";

/// `.sc` files that are not texture containers.
pub fn is_processable(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".sc") && !name.ends_with(TEXTURE_SUFFIX))
}

/// Files selected for processing from a file or directory argument.
///
/// Directories are scanned one level deep, in file name order.
pub fn collect_targets(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_processable(target) {
            return Ok(vec![target.to_path_buf()]);
        }
        if target.extension().and_then(|ext| ext.to_str()) != Some(SC_EXTENSION) {
            warn!("Invalid File: {}", display_name(target));
        } else {
            info!("Skipping texture file {}", display_name(target));
        }
        return Ok(Vec::new());
    }

    if target.is_dir() {
        let mut files = Vec::new();
        for entry in WalkDir::new(target)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_processable(entry.path()) {
                files.push(entry.into_path());
            }
        }
        return Ok(files);
    }

    Err(ScError::InvalidInput(format!(
        "{} does not exist",
        target.display()
    )))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub processed: usize,
    pub converted: usize,
    pub downgraded: usize,
    pub failed: usize,
}

pub struct ProcessCommand<'a> {
    ctx: &'a AppContext,
    converter: &'a dyn AssetConverter,
}

impl<'a> ProcessCommand<'a> {
    pub fn new(ctx: &'a AppContext, converter: &'a dyn AssetConverter) -> Self {
        Self { ctx, converter }
    }

    pub fn execute(&self, target: &Path, options: &ConvertOptions) -> Result<ProcessSummary> {
        self.verify_tools();
        log_options(options);
        options.validate()?;
        self.auto_download_downgrader();

        let downgrader = ToolDowngrader::new(self.ctx.runner());
        self.process_with(target, options, &downgrader)
    }

    /// Process `target` using `downgrader` for second generation files.
    pub fn process_with(
        &self,
        target: &Path,
        options: &ConvertOptions,
        downgrader: &dyn Downgrader,
    ) -> Result<ProcessSummary> {
        let files = collect_targets(target)?;
        let orchestrator = Orchestrator::new(downgrader);
        let mut summary = ProcessSummary::default();

        for file in files {
            info!("Processing: {}", display_name(&file));
            summary.processed += 1;

            let outcome = match orchestrator.process(&file) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Failed to read {}: {e}", file.display());
                    summary.failed += 1;
                    continue;
                }
            };

            match &outcome.verdict {
                Verdict::Done(_) => {
                    if outcome.was_downgraded() {
                        summary.downgraded += 1;
                    }
                    match self.converter.convert(&file, options) {
                        Ok(()) => summary.converted += 1,
                        Err(e) => {
                            error!("Conversion failed for {}: {e}", display_name(&file));
                            summary.failed += 1;
                        }
                    }
                }
                Verdict::Failed(reason) => {
                    warn!("Skipping {}: {reason}", display_name(&file));
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Processed {} file(s): {} converted, {} downgraded, {} failed",
            summary.processed, summary.converted, summary.downgraded, summary.failed
        );
        Ok(summary)
    }

    /// Log which tools are missing or need Wine.
    pub fn verify_tools(&self) {
        let platform = PlatformInfo::current();
        info!("Verifying tools...");
        info!("Platform: {} ({})", platform.os, platform.arch);

        let planner = self.ctx.planner();
        let config = self.ctx.store().get();
        let compat = planner.compat();
        for tool in [Tool::ScDowngrade, Tool::SctxConverter, Tool::PvrTexTool] {
            let info = planner.plan_execution(&tool.into(), Some(config.as_ref()));
            match (&info.path, info.execution_mode) {
                (None, _) => warn!("Missing {}", tool.binary_name()),
                (Some(_), ExecutionMode::CompatShim) => {
                    info!("{} will run via Wine", tool.binary_name())
                }
                (Some(_), ExecutionMode::Unavailable) => {
                    warn!("{}", unavailable_warning(tool, &info, &compat))
                }
                (Some(_), ExecutionMode::Native) => {}
            }
        }
    }

    fn auto_download_downgrader(&self) {
        if !self.ctx.store().get().settings.auto_download_tools {
            return;
        }
        let planner = self.ctx.planner();
        if planner
            .locator()
            .find_tool(&Tool::ScDowngrade.into(), Some(self.ctx.store().get().as_ref()))
            .is_some()
        {
            return;
        }

        info!("ScDowngrade is missing, downloading it");
        if let Err(e) = Installer::new(self.ctx.home()).download_tool(Tool::ScDowngrade) {
            warn!("Automatic download failed: {e}");
        }
    }
}

fn log_options(options: &ConvertOptions) {
    let state = |enabled: bool| if enabled { "Enabled" } else { "Disabled" };
    info!("Dump RAW {}.", state(options.dump_raw));
    info!("Dump PNG {}.", state(options.dump_png));
    info!("Layer Sorting {}.", state(options.sort_layers));
}

fn unavailable_warning(tool: Tool, info: &ToolInfo, compat: &CompatLayer) -> String {
    if compat.is_available() {
        format!("{} cannot run: {}", tool.binary_name(), unavailable_hint(info, compat))
    } else {
        format!("{} requires Wine (not installed)", tool.binary_name())
    }
}
