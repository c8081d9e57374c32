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

use crate::error::Result;
use crate::tools::ToolRunner;
use log::debug;
use std::path::Path;

/// Rewrites a second generation file as first generation, in place.
pub trait Downgrader {
    fn downgrade(&self, path: &Path) -> Result<()>;
}

/// Downgrades through the external ScDowngrade tool.
pub struct ToolDowngrader<'a> {
    runner: &'a ToolRunner,
}

impl<'a> ToolDowngrader<'a> {
    pub fn new(runner: &'a ToolRunner) -> Self {
        Self { runner }
    }
}

impl Downgrader for ToolDowngrader<'_> {
    fn downgrade(&self, path: &Path) -> Result<()> {
        let result = self.runner.run_sc_downgrade(path, path, None)?;
        debug!(
            "ScDowngrade finished in {:?}: {}",
            result.duration,
            result.stdout.trim()
        );
        Ok(())
    }
}
