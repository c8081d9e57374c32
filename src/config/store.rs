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

use super::{Config, ConfigLoadOutcome};
use crate::error::Result;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug)]
struct Snapshot {
    config: Arc<Config>,
    outcome: ConfigLoadOutcome,
}

/// Shared handle to the current configuration snapshot.
///
/// Readers receive an immutable `Arc<Config>`. Reloading or saving swaps the
/// snapshot under the write lock, so a reader never observes a partially
/// updated configuration.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Snapshot>,
}

impl ConfigStore {
    /// Load the configuration at `path` and wrap it in a store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (config, outcome) = Config::load_with_outcome(&path);
        Self {
            path,
            current: RwLock::new(Snapshot {
                config: Arc::new(config),
                outcome,
            }),
        }
    }

    /// A store holding `config` that was never read from disk.
    pub fn with_config(path: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Snapshot {
                config: Arc::new(config),
                outcome: ConfigLoadOutcome::Loaded,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Arc<Config> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard.config)
    }

    pub fn outcome(&self) -> ConfigLoadOutcome {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .outcome
    }

    /// Re-read the document and replace the shared snapshot.
    pub fn reload(&self) -> Arc<Config> {
        let (config, outcome) = Config::load_with_outcome(&self.path);
        let config = Arc::new(config);
        debug!("Reloaded config from {:?} ({outcome:?})", self.path);
        self.swap(Arc::clone(&config), outcome);
        config
    }

    /// Persist `config`, then make it the current snapshot.
    pub fn save(&self, config: Config) -> Result<Arc<Config>> {
        config.save(&self.path)?;
        let config = Arc::new(config);
        self.swap(Arc::clone(&config), ConfigLoadOutcome::Loaded);
        Ok(config)
    }

    fn swap(&self, config: Arc<Config>, outcome: ConfigLoadOutcome) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Snapshot { config, outcome };
    }
}
