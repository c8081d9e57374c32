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

use super::HeaderProbe;
use crate::error::Result;
use log::trace;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic plus the version field.
pub const HEADER_LEN: usize = 6;

/// Read up to [`HEADER_LEN`] leading bytes of `path`.
pub fn read_header(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    trace!("Read {} header bytes from {path:?}", header.len());
    Ok(header)
}

pub fn probe_file(path: &Path) -> Result<HeaderProbe> {
    Ok(HeaderProbe::of(&read_header(path)?))
}
