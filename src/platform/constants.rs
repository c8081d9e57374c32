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

//! Platform-specific constants and utility functions.

use super::detection::OperatingSystem;
use std::path::Path;

/// Extension carried by Windows executables.
pub const WINDOWS_EXTENSION: &str = ".exe";

/// Get the executable file extension for the given host OS
pub fn binary_extension(os: OperatingSystem) -> &'static str {
    if os.is_windows() { WINDOWS_EXTENSION } else { "" }
}

/// Whether the file at `path` is built for Windows, judged by its extension.
pub fn is_windows_binary(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("exe"))
        .unwrap_or(false)
}
