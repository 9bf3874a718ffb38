//! Atomic artifact writes.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::SnapshotError;

fn temp_path(path: &Path) -> Result<PathBuf, SnapshotError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SnapshotError::InvalidPath(path.display().to_string()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(dir.join(format!(
        ".{}.tmp.{}",
        file_name.to_string_lossy(),
        std::process::id()
    )))
}

/// Write `contents` to `path` as a whole or not at all.
///
/// The contents go to a sibling temp file that is renamed over the
/// destination; on failure the temp file is removed and the destination is
/// left untouched.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), SnapshotError> {
    let tmp = temp_path(path)?;

    let result = (|| -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(SnapshotError::Io {
            path: path.display().to_string(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}
