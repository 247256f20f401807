//! Atomic file writes for generated output.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::error::{Result, SplitterError};

/// Write `content` to `path` through a temp file, sync it, then rename.
///
/// A crash or a full disk leaves either the previous file or nothing, never a
/// truncated page. Failures carry the path being written.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let wrap = |source: std::io::Error| SplitterError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_path).map_err(wrap)?;
        file.write_all(content.as_bytes()).map_err(wrap)?;
        file.sync_all().map_err(wrap)?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(wrap)?;
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(wrap(source));
    }
    Ok(())
}
