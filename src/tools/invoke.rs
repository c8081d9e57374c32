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

//! Typed argument builders for each known tool.

use super::registry::Tool;
use super::runner::{ExecutionResult, RunOptions, ToolRunner};
use crate::error::Result;
use std::ffi::OsString;
use std::path::Path;

/// Color space passed to PVRTexToolCLI when none is given.
pub const DEFAULT_COLOR_SPACE: &str = "sRGB";

/// Format the downgrader should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DowngradeTarget {
    V1,
    V05,
}

impl DowngradeTarget {
    pub fn as_arg(&self) -> &'static str {
        match self {
            DowngradeTarget::V1 => "1.0",
            DowngradeTarget::V05 => "0.5",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SctxMode {
    Decode,
    Encode,
}

impl SctxMode {
    pub fn as_arg(&self) -> &'static str {
        match self {
            SctxMode::Decode => "decode",
            SctxMode::Encode => "encode",
        }
    }
}

pub fn sc_downgrade_args(
    input: &Path,
    output: &Path,
    target: Option<DowngradeTarget>,
) -> Vec<OsString> {
    let mut args = vec![input.as_os_str().to_owned(), output.as_os_str().to_owned()];
    if let Some(target) = target {
        args.push(target.as_arg().into());
    }
    args
}

pub fn sctx_converter_args(
    mode: SctxMode,
    input: &Path,
    output: &Path,
    transparent: bool,
) -> Vec<OsString> {
    let mut args = vec![
        OsString::from(mode.as_arg()),
        input.as_os_str().to_owned(),
        output.as_os_str().to_owned(),
    ];
    if transparent {
        args.push("-t".into());
    }
    args
}

pub fn pvr_tex_tool_args(input: &Path, output: &Path, color_space: &str) -> Vec<OsString> {
    vec![
        "-i".into(),
        input.as_os_str().to_owned(),
        "-d".into(),
        output.as_os_str().to_owned(),
        "-ics".into(),
        color_space.into(),
        "-noout".into(),
    ]
}

impl ToolRunner {
    pub fn run_sc_downgrade(
        &self,
        input: &Path,
        output: &Path,
        target: Option<DowngradeTarget>,
    ) -> Result<ExecutionResult> {
        self.run(
            &Tool::ScDowngrade.into(),
            &sc_downgrade_args(input, output, target),
            &RunOptions::default(),
        )
    }

    pub fn run_sctx_converter(
        &self,
        mode: SctxMode,
        input: &Path,
        output: &Path,
        transparent: bool,
    ) -> Result<ExecutionResult> {
        self.run(
            &Tool::SctxConverter.into(),
            &sctx_converter_args(mode, input, output, transparent),
            &RunOptions::default(),
        )
    }

    pub fn run_pvr_tex_tool(
        &self,
        input: &Path,
        output: &Path,
        color_space: &str,
    ) -> Result<ExecutionResult> {
        self.run(
            &Tool::PvrTexTool.into(),
            &pvr_tex_tool_args(input, output, color_space),
            &RunOptions::default(),
        )
    }
}
