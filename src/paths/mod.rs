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

//! Filesystem layout of the toolkit home directory.
//!
//! ```text
//! <home>/
//!   sc2fla_config.json
//!   lib/                 legacy flat tool location
//!     bin/{windows,macos,linux,unknown}/
//!   user-scripts/
//! ```

pub mod home;
pub mod shared;

use crate::error::{Result, ScError};
use log::debug;
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the toolkit home directory.
pub const HOME_ENV: &str = "SC2FLA_HOME";
const DEFAULT_HOME_DIR: &str = ".sc2fla";

/// Resolve the toolkit home: `$SC2FLA_HOME`, else `~/.sc2fla`.
pub fn resolve_home() -> Result<PathBuf> {
    if let Ok(value) = env::var(HOME_ENV)
        && !value.trim().is_empty()
    {
        debug!("Using {HOME_ENV}={value}");
        return Ok(PathBuf::from(value));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .ok_or(ScError::HomeNotFound)
}
