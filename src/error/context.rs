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

use crate::error::{ExecutionFailure, ScError};
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a ScError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a ScError) -> Self {
        let (suggestion, details) = match error {
            ScError::ToolNotFound { path, hint, .. } => {
                let suggestion = hint.clone().or_else(|| {
                    Some(
                        "Run 'sc2fla --tools' to see where tools are searched, or 'sc2fla \
                         --setup --download' to fetch them."
                            .to_string(),
                    )
                });
                let details = path
                    .as_ref()
                    .map(|p| format!("Resolved path: {}", p.display()));
                (suggestion, details)
            }
            ScError::ToolExecution { failure, .. } => match failure {
                ExecutionFailure::ExitStatus { stdout, stderr, .. } => {
                    let mut lines = Vec::new();
                    if !stdout.trim().is_empty() {
                        lines.push(format!("stdout: {}", stdout.trim()));
                    }
                    if !stderr.trim().is_empty() {
                        lines.push(format!("stderr: {}", stderr.trim()));
                    }
                    let details = if lines.is_empty() {
                        None
                    } else {
                        Some(lines.join("\n"))
                    };
                    (
                        Some("Re-run with -v to see the full command line.".to_string()),
                        details,
                    )
                }
                ExecutionFailure::TimedOut { timeout } => (
                    Some(
                        "The tool may be waiting for input or processing a very large file."
                            .to_string(),
                    ),
                    Some(format!("Timeout: {timeout:?}")),
                ),
                ExecutionFailure::Spawn { message } => (
                    Some("Check that the tool binary is executable.".to_string()),
                    Some(message.clone()),
                ),
            },
            ScError::ConflictingOptions(_) => (
                Some("Choose either --dump-raw or --dump-png.".to_string()),
                None,
            ),
            ScError::ConfigError(msg) => (
                Some(
                    "Check the configuration file with 'sc2fla --config'. Delete it to restore \
                     defaults."
                        .to_string(),
                ),
                Some(msg.clone()),
            ),
            ScError::Codec(msg) => (
                Some("The file may not be an SC container or may be truncated.".to_string()),
                Some(msg.clone()),
            ),
            ScError::Download(msg) => (
                Some(
                    "Check your internet connection, or place the tools into lib/bin manually."
                        .to_string(),
                ),
                Some(msg.clone()),
            ),
            ScError::HomeNotFound => (
                Some("Set SC2FLA_HOME to the toolkit directory.".to_string()),
                None,
            ),
            ScError::Http(http_err) => {
                let error_string = http_err.to_string();
                let suggestion = if error_string.contains("403") || error_string.contains("429") {
                    Some("GitHub API rate limit exceeded. Please wait and try again.".to_string())
                } else {
                    Some("Check your internet connection and try again.".to_string())
                };
                (suggestion, Some(format!("HTTP error: {http_err}")))
            }
            ScError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Check file permissions.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                (suggestion, Some(format!("I/O error: {io_err}")))
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
