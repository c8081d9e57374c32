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

use super::planner::{ExecutionMode, ToolInfo};
use crate::error::{Result, ScError};
use crate::platform::{CompatLayer, OperatingSystem};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Command;

/// The concrete command line for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ExecutionPlan {
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Space-joined argv for logs.
    pub fn display(&self) -> String {
        self.argv()
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// How to get Wine onto a host that lacks it.
pub fn wine_install_hint(host_os: OperatingSystem) -> &'static str {
    match host_os {
        OperatingSystem::MacOs => "Install Wine with: brew install wine-stable",
        OperatingSystem::Linux => {
            "Install Wine with your package manager (e.g. sudo apt install wine64)"
        }
        OperatingSystem::Windows | OperatingSystem::Unknown => {
            "Install Wine to run Windows tools on this platform"
        }
    }
}

/// Why a located tool cannot run, and what to do about it.
pub fn unavailable_hint(info: &ToolInfo, compat: &CompatLayer) -> String {
    if info.is_windows_binary && compat.is_available() {
        format!(
            "'{}' is a Windows binary and use_wine is disabled. Enable use_wine in sc2fla_config.json or install a native build",
            info.name.canonical_name()
        )
    } else {
        wine_install_hint(info.host_os).to_string()
    }
}

/// Turn a resolved tool and its arguments into an execution plan.
pub fn build_command<S: AsRef<OsStr>>(
    info: &ToolInfo,
    args: &[S],
    compat: &CompatLayer,
) -> Result<ExecutionPlan> {
    let Some(path) = &info.path else {
        return Err(ScError::ToolNotFound {
            tool: info.name.to_string(),
            path: None,
            hint: None,
        });
    };

    let args = args.iter().map(|arg| arg.as_ref().to_os_string());
    match info.execution_mode {
        ExecutionMode::Native => Ok(ExecutionPlan {
            program: path.clone(),
            args: args.collect(),
        }),
        ExecutionMode::CompatShim => {
            let launcher = compat.launcher().ok_or_else(|| ScError::ToolNotFound {
                tool: info.name.to_string(),
                path: Some(path.clone()),
                hint: Some(wine_install_hint(info.host_os).to_string()),
            })?;
            Ok(ExecutionPlan {
                program: launcher.to_path_buf(),
                args: std::iter::once(path.clone().into_os_string())
                    .chain(args)
                    .collect(),
            })
        }
        ExecutionMode::Unavailable => Err(ScError::ToolNotFound {
            tool: info.name.to_string(),
            path: Some(path.clone()),
            hint: Some(unavailable_hint(info, compat)),
        }),
    }
}
