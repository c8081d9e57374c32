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

//! Sniff, downgrade once, re-sniff.
//!
//! Each file walks `Sniff -> [Downgrading -> Reconfirm] -> Done | Failed`.
//! A second generation file gets exactly one downgrade attempt. Per-file
//! failures are reported as data in [`ProcessOutcome`]; only failing to read
//! the file is an error.

mod downgrader;

pub use downgrader::{Downgrader, ToolDowngrader};

use crate::error::{Result, ScError};
use crate::version::{FileVersionTag, Generation, HeaderProbe, probe_file};
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Sniff,
    Downgrading,
    Reconfirm,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    BadMagic,
    UnsupportedVersion { big_endian: u32, little_endian: u32 },
    /// The downgrader could not be resolved or launched.
    DowngradeUnavailable(String),
    /// The downgrader ran and failed.
    DowngradeFailed(String),
    /// The downgrader succeeded but the file is still not first generation.
    DowngradeIneffective(Option<FileVersionTag>),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::BadMagic => write!(f, "bad magic"),
            FailureReason::UnsupportedVersion {
                big_endian,
                little_endian,
            } => write!(
                f,
                "unsupported version (BE {big_endian}, LE {little_endian})"
            ),
            FailureReason::DowngradeUnavailable(message) => {
                write!(f, "downgrade unavailable: {message}")
            }
            FailureReason::DowngradeFailed(message) => write!(f, "downgrade failed: {message}"),
            FailureReason::DowngradeIneffective(Some(tag)) => {
                write!(f, "downgrade produced no usable result (still {tag})")
            }
            FailureReason::DowngradeIneffective(None) => {
                write!(f, "downgrade produced no usable result")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Ready for the asset converter.
    Done(FileVersionTag),
    Failed(FailureReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub path: PathBuf,
    /// Every state visited, ending in `Done` or `Failed`.
    pub trace: Vec<State>,
    pub downgrade_attempts: u32,
    pub verdict: Verdict,
}

impl ProcessOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self.verdict, Verdict::Done(_))
    }

    pub fn was_downgraded(&self) -> bool {
        self.is_done() && self.downgrade_attempts > 0
    }
}

/// Drives one file through the downgrade state machine.
pub struct Orchestrator<'a> {
    downgrader: &'a dyn Downgrader,
}

impl<'a> Orchestrator<'a> {
    pub fn new(downgrader: &'a dyn Downgrader) -> Self {
        Self { downgrader }
    }

    pub fn process(&self, path: &Path) -> Result<ProcessOutcome> {
        let mut run = Run::new(path);

        let tag = match probe_file(path)? {
            HeaderProbe::BadMagic => return Ok(run.fail(FailureReason::BadMagic)),
            HeaderProbe::Unrecognized {
                big_endian,
                little_endian,
            } => {
                return Ok(run.fail(FailureReason::UnsupportedVersion {
                    big_endian,
                    little_endian,
                }));
            }
            HeaderProbe::Tagged(tag) => tag,
        };
        debug!("{} is {tag}", path.display());

        if tag.generation == Generation::Gen1 {
            return Ok(run.done(tag));
        }

        info!("Detected SC2 file {}, downgrading", path.display());
        run.enter(State::Downgrading);
        run.attempts += 1;
        if let Err(e) = self.downgrader.downgrade(path) {
            let reason = match &e {
                ScError::ToolNotFound {
                    hint: Some(hint), ..
                } => FailureReason::DowngradeUnavailable(format!("{e}. {hint}")),
                ScError::ToolNotFound { .. } => FailureReason::DowngradeUnavailable(e.to_string()),
                _ => FailureReason::DowngradeFailed(e.to_string()),
            };
            return Ok(run.fail(reason));
        }

        run.enter(State::Reconfirm);
        match probe_file(path)?.tag() {
            Some(tag) if tag.generation == Generation::Gen1 => {
                info!("Downgraded {} to {tag}", path.display());
                Ok(run.done(tag))
            }
            other => Ok(run.fail(FailureReason::DowngradeIneffective(other))),
        }
    }
}

struct Run {
    path: PathBuf,
    trace: Vec<State>,
    attempts: u32,
}

impl Run {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            trace: vec![State::Sniff],
            attempts: 0,
        }
    }

    fn enter(&mut self, state: State) {
        self.trace.push(state);
    }

    fn done(mut self, tag: FileVersionTag) -> ProcessOutcome {
        self.enter(State::Done);
        self.finish(Verdict::Done(tag))
    }

    fn fail(mut self, reason: FailureReason) -> ProcessOutcome {
        warn!("Processing failed for {}: {reason}", self.path.display());
        self.enter(State::Failed);
        self.finish(Verdict::Failed(reason))
    }

    fn finish(self, verdict: Verdict) -> ProcessOutcome {
        ProcessOutcome {
            path: self.path,
            trace: self.trace,
            downgrade_attempts: self.attempts,
            verdict,
        }
    }
}
