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

//! Payload compression for `.sc` containers.
//!
//! Framed layout written by [`ScCodec`]:
//!
//! ```text
//! "SC" | version: u32 BE | digest_len: u32 BE | md5(plain) | zlib(plain)
//! ```
//!
//! The body is a zlib stream, so `.cmp` files are not readable by tools
//! expecting LZMA-compressed SC containers.

use crate::error::{Result, ScError};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use log::debug;
use std::io::{Read, Write};

/// Marker separating the payload from trailing metadata.
pub const START_MARKER: &[u8] = b"START";

const MAGIC: &[u8; 2] = b"SC";
const FIXED_HEADER_LEN: usize = 10;
const MD5_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Raw bytes, no framing.
    None,
    Sc,
}

pub trait PayloadCodec {
    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>>;
    fn compress(&self, bytes: &[u8], signature: Signature, version: u32) -> Result<Vec<u8>>;
}

/// Drop the `START` marker and everything after it.
pub fn strip_start_marker(bytes: &[u8]) -> &[u8] {
    bytes
        .windows(START_MARKER.len())
        .position(|window| window == START_MARKER)
        .map_or(bytes, |index| &bytes[..index])
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScCodec;

impl ScCodec {
    fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
        let mut plain = Vec::new();
        ZlibDecoder::new(compressed)
            .read_to_end(&mut plain)
            .map_err(|e| ScError::Codec(format!("Failed to inflate payload: {e}")))?;
        Ok(plain)
    }

    fn deflate(plain: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(plain)?;
        Ok(encoder.finish()?)
    }
}

fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl PayloadCodec for ScCodec {
    /// Unframe and inflate `bytes`. Input without the `SC` magic is returned
    /// unchanged.
    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if !bytes.starts_with(MAGIC) {
            debug!("No SC signature, passing {} bytes through", bytes.len());
            return Ok(bytes.to_vec());
        }
        if bytes.len() < FIXED_HEADER_LEN {
            return Err(ScError::Codec("Truncated SC header".to_string()));
        }

        let version = read_u32_be(bytes, 2);
        let digest_len = read_u32_be(bytes, 6) as usize;
        let payload_start = FIXED_HEADER_LEN
            .checked_add(digest_len)
            .filter(|end| *end <= bytes.len())
            .ok_or_else(|| ScError::Codec(format!("Digest length {digest_len} exceeds input")))?;
        let digest = &bytes[FIXED_HEADER_LEN..payload_start];

        let plain = Self::inflate(&bytes[payload_start..])?;
        if digest.len() == MD5_LEN && md5::compute(&plain).0 != digest {
            return Err(ScError::Codec("Payload digest mismatch".to_string()));
        }

        debug!(
            "Decompressed SC v{version}: {} -> {} bytes",
            bytes.len(),
            plain.len()
        );
        Ok(plain)
    }

    fn compress(&self, bytes: &[u8], signature: Signature, version: u32) -> Result<Vec<u8>> {
        match signature {
            Signature::None => Ok(bytes.to_vec()),
            Signature::Sc => {
                let digest = md5::compute(bytes);
                let compressed = Self::deflate(bytes)?;

                let mut framed =
                    Vec::with_capacity(FIXED_HEADER_LEN + MD5_LEN + compressed.len());
                framed.extend_from_slice(MAGIC);
                framed.extend_from_slice(&version.to_be_bytes());
                framed.extend_from_slice(&(MD5_LEN as u32).to_be_bytes());
                framed.extend_from_slice(&digest.0);
                framed.extend_from_slice(&compressed);
                Ok(framed)
            }
        }
    }
}
