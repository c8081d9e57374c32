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

//! Host operating system and architecture detection.
//!
//! Detection never fails: anything that is not recognized becomes the
//! `Unknown` variant of the respective enum.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use sysinfo::System;

/// Marker installed by the Rosetta 2 runtime on Apple silicon.
pub const ROSETTA_RUNTIME_PATH: &str = "/Library/Apple/usr/share/rosetta";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatingSystem {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl OperatingSystem {
    pub fn from_os_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "windows" => OperatingSystem::Windows,
            "macos" | "darwin" => OperatingSystem::MacOs,
            "linux" => OperatingSystem::Linux,
            _ => OperatingSystem::Unknown,
        }
    }

    /// Name used for the per-platform binary directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOs => "macos",
            OperatingSystem::Linux => "linux",
            OperatingSystem::Unknown => "unknown",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, OperatingSystem::Windows)
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86_64,
    Arm64,
    X86,
    Unknown,
}

impl Architecture {
    pub fn from_machine(machine: &str) -> Self {
        match machine.to_lowercase().as_str() {
            "x86_64" | "amd64" => Architecture::X86_64,
            "arm64" | "aarch64" => Architecture::Arm64,
            "x86" | "i386" | "i586" | "i686" => Architecture::X86,
            _ => Architecture::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86_64 => "x86_64",
            Architecture::Arm64 => "arm64",
            Architecture::X86 => "x86",
            Architecture::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the rest of the application needs to know about the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub os: OperatingSystem,
    pub arch: Architecture,
    pub is_64bit: bool,
    pub os_version: String,
}

/// Cached platform information to avoid repeated system calls.
static CACHED_PLATFORM: OnceLock<PlatformInfo> = OnceLock::new();

impl PlatformInfo {
    /// The platform of the running process, computed on first use.
    pub fn current() -> &'static PlatformInfo {
        CACHED_PLATFORM.get_or_init(Self::probe)
    }

    fn probe() -> PlatformInfo {
        let os_version = System::long_os_version()
            .or_else(System::os_version)
            .unwrap_or_else(|| "unknown".to_string());

        PlatformInfo {
            os: OperatingSystem::from_os_name(std::env::consts::OS),
            arch: Architecture::from_machine(std::env::consts::ARCH),
            is_64bit: cfg!(target_pointer_width = "64"),
            os_version,
        }
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OS: {} ({})\nArchitecture: {}\n64-bit: {}",
            self.os, self.os_version, self.arch, self.is_64bit
        )
    }
}

/// Get the cached platform information for the running process.
pub fn detect_platform() -> &'static PlatformInfo {
    PlatformInfo::current()
}

pub fn get_current_os() -> OperatingSystem {
    PlatformInfo::current().os
}

pub fn get_current_architecture() -> Architecture {
    PlatformInfo::current().arch
}

/// Check if Rosetta 2 can run x86_64 binaries on this host.
pub fn is_emulation_available() -> bool {
    emulation_available_for(PlatformInfo::current(), Path::new(ROSETTA_RUNTIME_PATH))
}

pub(crate) fn emulation_available_for(platform: &PlatformInfo, marker: &Path) -> bool {
    platform.os == OperatingSystem::MacOs
        && platform.arch == Architecture::Arm64
        && marker.exists()
}
