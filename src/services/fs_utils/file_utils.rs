use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Write `bytes` to a file that must not exist yet, creating parent
/// directories as needed. A partially written file is removed on error.
pub fn write_new_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            log::warn!("Failed to remove partial file {}: {}", path.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}

/// Hex BLAKE3 digest of file content.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
#[path = "tests/file_utils_tests.rs"]
mod tests;
