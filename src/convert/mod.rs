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

//! Handoff of first generation files to the asset converter.

use crate::error::{Result, ScError};
use log::info;
use std::cell::Cell;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub dump_raw: bool,
    pub dump_png: bool,
    pub sort_layers: bool,
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if self.dump_raw && self.dump_png {
            return Err(ScError::ConflictingOptions(
                "Both RAW and PNG dump cannot be enabled at the same time.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Turns a first generation `.sc` file into an authoring tool project.
pub trait AssetConverter {
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<()>;
}

/// Converter that records each handoff.
#[derive(Debug, Default)]
pub struct ReportingConverter {
    converted: Cell<usize>,
}

impl ReportingConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn converted(&self) -> usize {
        self.converted.get()
    }
}

impl AssetConverter for ReportingConverter {
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<()> {
        info!(
            "Handing {} to the asset converter (dump_raw={}, dump_png={}, sort_layers={})",
            path.display(),
            options.dump_raw,
            options.dump_png,
            options.sort_layers
        );
        self.converted.set(self.converted.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_both_dumps() {
        let options = ConvertOptions {
            dump_raw: true,
            dump_png: true,
            sort_layers: false,
        };
        assert!(matches!(
            options.validate(),
            Err(ScError::ConflictingOptions(_))
        ));
        assert!(ConvertOptions::default().validate().is_ok());
        assert!(
            ConvertOptions {
                dump_raw: true,
                ..ConvertOptions::default()
            }
            .validate()
            .is_ok()
        );
    }

    #[test]
    fn test_reporting_converter_counts() {
        let converter = ReportingConverter::new();
        let options = ConvertOptions::default();
        converter.convert(Path::new("a.sc"), &options).unwrap();
        converter.convert(Path::new("b.sc"), &options).unwrap();
        assert_eq!(converter.converted(), 2);
    }
}
