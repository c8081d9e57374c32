use std::fs;
use std::path::{Path, PathBuf};

/// `.sc` header with a big-endian version tag followed by `payload`.
pub fn sc_bytes(version: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = b"SC".to_vec();
    bytes.extend_from_slice(&version.to_be_bytes());
    bytes.extend_from_slice(payload);
    bytes
}

pub fn write_sc_file(dir: &Path, name: &str, version: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, sc_bytes(version, b"payload")).expect("Failed to write sc file");
    path
}

/// Executable shell script standing in for a native tool.
#[cfg(unix)]
pub fn write_tool_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).expect("Failed to create tool directory");
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write tool script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make tool script executable");
    path
}
