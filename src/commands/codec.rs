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

use crate::codec::{PayloadCodec, ScCodec, Signature, strip_start_marker};
use crate::error::{Result, ScError};
use log::info;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const DECOMPRESSED_SUFFIX: &str = ".dec";
pub const COMPRESSED_SUFFIX: &str = ".cmp";
const COMPRESSED_VERSION: u32 = 1;

/// `--decompress` and `--compress`.
pub struct CodecCommand<'a> {
    codec: &'a dyn PayloadCodec,
}

impl<'a> CodecCommand<'a> {
    pub fn new(codec: &'a dyn PayloadCodec) -> Self {
        Self { codec }
    }

    /// Write the decompressed payload of `file` to `<file>.dec`.
    ///
    /// Anything from the first `START` marker on is a metadata trailer and
    /// is cut off before decompressing.
    pub fn decompress(&self, file: &Path) -> Result<PathBuf> {
        let bytes = read_input(file)?;
        let plain = self.codec.decompress(strip_start_marker(&bytes))?;
        let output = sibling_with_suffix(file, DECOMPRESSED_SUFFIX);
        fs::write(&output, plain)?;
        info!("Decompressed {} to {}", file.display(), output.display());
        Ok(output)
    }

    /// Write `file` framed with the SC signature to `<file>.cmp`.
    pub fn compress(&self, file: &Path) -> Result<PathBuf> {
        let bytes = read_input(file)?;
        let framed = self
            .codec
            .compress(&bytes, Signature::Sc, COMPRESSED_VERSION)?;
        let output = sibling_with_suffix(file, COMPRESSED_SUFFIX);
        fs::write(&output, framed)?;
        info!("Compressed {} to {}", file.display(), output.display());
        Ok(output)
    }
}

impl Default for CodecCommand<'static> {
    fn default() -> Self {
        static CODEC: ScCodec = ScCodec;
        Self::new(&CODEC)
    }
}

fn read_input(file: &Path) -> Result<Vec<u8>> {
    if !file.is_file() {
        return Err(ScError::InvalidInput(format!(
            "{} is not a file",
            file.display()
        )));
    }
    Ok(fs::read(file)?)
}

fn sibling_with_suffix(file: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
