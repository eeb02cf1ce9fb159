use crate::error::{H2hError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Whether the file name ends with `suffix`
pub fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}

/// Collect every regular file under `root` whose name ends with `suffix`.
///
/// `skip` names a directory to leave out of the walk, used when the output
/// tree lives inside the input tree. Any enumeration error aborts the walk.
pub fn collect_files(root: &Path, suffix: &str, skip: Option<&Path>) -> Result<Vec<PathBuf>> {
    let skip = skip.and_then(|p| p.canonicalize().ok());
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        match (&skip, entry.file_type().is_dir()) {
            (Some(skip), true) => entry
                .path()
                .canonicalize()
                .map(|p| &p != skip)
                .unwrap_or(true),
            _ => true,
        }
    });

    for entry in walker {
        let entry = entry.map_err(|e| H2hError::walk(root, e))?;
        if entry.file_type().is_file() && has_suffix(entry.path(), suffix) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Path of `file` relative to `src_root`, re-rooted under `dst_root`
pub fn mirror_path(src_root: &Path, file: &Path, dst_root: &Path) -> PathBuf {
    let relative = file.strip_prefix(src_root).unwrap_or(file);
    dst_root.join(relative)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| H2hError::io("reading source file", path, e))
}

pub fn permissions(path: &Path) -> Result<fs::Permissions> {
    fs::metadata(path)
        .map(|m| m.permissions())
        .map_err(|e| H2hError::io("opening source file", path, e))
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| H2hError::io("creating destination directory", path, e))
}

/// Write `content` to a temp file beside `path`, then rename it into place.
///
/// Temp files are created owner-only, so `permissions` (usually the source
/// file's) are applied before the rename. On failure the temp file is
/// dropped and nothing appears at `path`.
pub fn write_atomic(path: &Path, content: &str, permissions: Option<fs::Permissions>) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .map_err(|e| H2hError::io("creating destination file", path, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.flush())
        .map_err(|e| H2hError::io("writing destination file", path, e))?;
    if let Some(permissions) = permissions {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(|e| H2hError::io("writing destination file", path, e))?;
    }
    temp.persist(path)
        .map_err(|e| H2hError::io("writing destination file", path, e.error))?;
    Ok(())
}
