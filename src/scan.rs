use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::models::Format;

/// Extensions of source files that get transcoded.
const SOURCE_EXTENSIONS: &[&str] = &["flac"];

fn is_source_audio(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// List the audio files of a release, relative to `dir`, sorted.
///
/// Symlinks are not followed. Any error while walking is returned as-is.
pub fn audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() || !is_source_audio(entry.path()) {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .with_context(|| format!("{} is outside {}", entry.path().display(), dir.display()))?;
        files.push(relative.to_path_buf());
    }
    files.sort();
    Ok(files)
}

/// Longest relative path, in bytes, the transcoded files will have.
/// Returns 0 when there are no files.
pub fn longest_output_path(files: &[PathBuf], format: Format) -> usize {
    files
        .iter()
        .map(|f| f.with_extension(format.extension()).as_os_str().len())
        .max()
        .unwrap_or(0)
}
