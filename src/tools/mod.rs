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

//! Resolution and execution of the external conversion tools.
//!
//! A logical [`ToolName`] is located by the [`Locator`], classified by the
//! [`Planner`] into an [`ExecutionMode`], turned into an [`ExecutionPlan`]
//! and finally run by the [`ToolRunner`].

mod command;
mod invoke;
mod locator;
mod planner;
mod registry;
mod runner;

pub use command::{ExecutionPlan, build_command, unavailable_hint, wine_install_hint};
pub use invoke::{
    DEFAULT_COLOR_SPACE, DowngradeTarget, SctxMode, pvr_tex_tool_args, sc_downgrade_args,
    sctx_converter_args,
};
pub use locator::{Candidate, CandidateSource, Locator};
pub use planner::{ExecutionMode, Planner, ToolInfo, decide_mode};
pub use registry::{Tool, ToolName};
pub use runner::{ExecutionResult, RunOptions, ToolRunner};
