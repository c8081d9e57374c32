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

pub mod codec;
pub mod process;
pub mod setup;
pub mod status;

use crate::config::ConfigStore;
use crate::paths::home;
use crate::tools::{Planner, ToolRunner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// State shared by every command of one invocation.
pub struct AppContext {
    home: PathBuf,
    store: Arc<ConfigStore>,
    runner: ToolRunner,
}

impl AppContext {
    /// Open the configuration under `home` and detect the host.
    pub fn open(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let store = Arc::new(ConfigStore::open(home::config_file(&home)));
        let verbose = store.get().settings.verbose;
        let planner = Planner::detect(&home, Arc::clone(&store));
        Self::with_runner(home, store, ToolRunner::new(planner, verbose))
    }

    pub fn with_runner(home: PathBuf, store: Arc<ConfigStore>, runner: ToolRunner) -> Self {
        Self {
            home,
            store,
            runner,
        }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn runner(&self) -> &ToolRunner {
        &self.runner
    }

    pub fn planner(&self) -> &Planner {
        self.runner.planner()
    }
}
