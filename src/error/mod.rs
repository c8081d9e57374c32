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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::format_error_chain;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// How an invoked tool failed after its binary was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    /// The process ran to completion with a non-zero exit code.
    ExitStatus {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process outlived the configured timeout and was killed.
    TimedOut { timeout: Duration },
    /// The process could not be started or waited on.
    Spawn { message: String },
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionFailure::ExitStatus { code: Some(code), .. } => {
                write!(f, "failed with exit code {code}")
            }
            ExecutionFailure::ExitStatus { code: None, .. } => {
                write!(f, "was terminated by a signal")
            }
            ExecutionFailure::TimedOut { timeout } => {
                write!(f, "timed out after {} seconds", timeout.as_secs_f64())
            }
            ExecutionFailure::Spawn { message } => write!(f, "could not be started: {message}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ScError {
    #[error("Tool '{tool}' is not available")]
    ToolNotFound {
        tool: String,
        path: Option<PathBuf>,
        hint: Option<String>,
    },

    #[error("Tool '{tool}' {failure}")]
    ToolExecution {
        tool: String,
        failure: ExecutionFailure,
    },

    #[error("{0}")]
    ConflictingOptions(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Failed to download tool: {0}")]
    Download(String),

    #[error("Unable to determine the sc2fla home directory")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] attohttpc::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    WalkDir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, ScError>;
