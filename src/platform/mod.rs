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

//! Platform detection utilities for the entire application.
//!
//! This module provides functions to detect the current system's platform
//! characteristics (OS, architecture, compatibility layers) which gate how
//! external tools can be executed.

pub mod compat;

mod constants;
mod detection;

pub use compat::{CompatLayer, is_compat_shim_available};

pub use detection::{
    Architecture, OperatingSystem, PlatformInfo, ROSETTA_RUNTIME_PATH, detect_platform,
    get_current_architecture, get_current_os, is_emulation_available,
};

pub use constants::{WINDOWS_EXTENSION, binary_extension, is_windows_binary};
