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

use crate::error::ScError;
use std::fmt;
use std::str::FromStr;

/// The external tools the toolkit knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    ScDowngrade,
    SctxConverter,
    PvrTexTool,
    ScTex,
}

impl Tool {
    /// Every known tool, in reporting order.
    pub const ALL: [Tool; 4] = [
        Tool::ScDowngrade,
        Tool::SctxConverter,
        Tool::PvrTexTool,
        Tool::ScTex,
    ];

    /// Logical identifier used in the config document and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Tool::ScDowngrade => "sc_downgrade",
            Tool::SctxConverter => "sctx_converter",
            Tool::PvrTexTool => "pvr_tex_tool",
            Tool::ScTex => "sc_tex",
        }
    }

    /// Binary base name, without any extension.
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::ScDowngrade => "ScDowngrade",
            Tool::SctxConverter => "SctxConverter",
            Tool::PvrTexTool => "PVRTexToolCLI",
            Tool::ScTex => "SCTex",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::ScDowngrade => "Converts SC2 files back to the SC1 format",
            Tool::SctxConverter => "Decodes and encodes SCTX textures",
            Tool::PvrTexTool => "Converts KTX textures to PNG",
            Tool::ScTex => "Extracts textures from _tex.sc files",
        }
    }

    /// GitHub repository publishing Windows builds of the tool, if any.
    pub fn release_repository(&self) -> Option<&'static str> {
        match self {
            Tool::ScDowngrade => Some("Daniil-SV/ScDowngrade"),
            Tool::SctxConverter => Some("Daniil-SV/SCTX-Converter"),
            Tool::PvrTexTool | Tool::ScTex => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tool {
    type Err = ScError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| ScError::InvalidInput(format!("Unknown tool '{s}'")))
    }
}

/// A logical tool name as requested by a caller.
///
/// Names outside the known set are still resolvable: their canonical binary
/// name is the logical name itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ToolName {
    Known(Tool),
    Custom(String),
}

impl ToolName {
    pub fn id(&self) -> &str {
        match self {
            ToolName::Known(tool) => tool.id(),
            ToolName::Custom(name) => name,
        }
    }

    pub fn canonical_name(&self) -> &str {
        match self {
            ToolName::Known(tool) => tool.binary_name(),
            ToolName::Custom(name) => name,
        }
    }

    pub fn known(&self) -> Option<Tool> {
        match self {
            ToolName::Known(tool) => Some(*tool),
            ToolName::Custom(_) => None,
        }
    }
}

impl From<Tool> for ToolName {
    fn from(tool: Tool) -> Self {
        ToolName::Known(tool)
    }
}

impl From<&str> for ToolName {
    fn from(name: &str) -> Self {
        match Tool::from_str(name) {
            Ok(tool) => ToolName::Known(tool),
            Err(_) => ToolName::Custom(name.to_string()),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
