//! Converting whole directory trees of posts
//!
//! Matching files are enumerated up front, then handed to a fixed pool of
//! worker threads. A file that fails is recorded and cleaned up without
//! touching the others; the run fails as a whole only when enumeration or
//! configuration does, or when at least one file failed.

use crate::config::ConvertConfig;
use crate::core::MarkdownConverter;
use crate::error::{H2hError, Result};
use crate::io::{self, collect_files, mirror_path};
use log::{debug, info, warn};
use serde_json::json;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// A single file that could not be converted
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: H2hError,
}

impl FileFailure {
    pub fn new(path: impl Into<PathBuf>, error: H2hError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "converting file {}: {}", self.path.display(), self.error)
    }
}

/// Outcome of a tree conversion
#[derive(Debug, Default)]
pub struct ConversionSummary {
    /// Files written successfully
    pub converted: usize,
    /// Files that failed, sorted by source path
    pub failures: Vec<FileFailure>,
}

impl ConversionSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of files the run attempted
    pub fn total(&self) -> usize {
        self.converted + self.failures.len()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let failures: Vec<serde_json::Value> = self
            .failures
            .iter()
            .map(|f| {
                json!({
                    "path": f.path.display().to_string(),
                    "error": f.error.to_string(),
                })
            })
            .collect();

        json!({
            "converted": self.converted,
            "failed": self.failures.len(),
            "failures": failures,
        })
    }
}

/// Convert one file from `src_path` to `dst_path`.
///
/// The destination is written atomically, so a failure never leaves a
/// partial file behind and never touches whatever already sits at
/// `dst_path`. That includes the source itself on an in-place run.
pub fn convert_file(converter: &MarkdownConverter, src_path: &Path, dst_path: &Path) -> Result<()> {
    if let Some(parent) = dst_path.parent() {
        io::fs::create_dir_all(parent)?;
    }

    let permissions = io::fs::permissions(src_path)?;
    let content = io::read_to_string(src_path)?;
    let converted = converter.convert(&content)?;
    io::write_atomic(dst_path, &converted, Some(permissions))
}

/// Convert every matching file under `src_dir` into the mirrored path under
/// `dst_dir`.
///
/// Returns the summary when every file converted. When some files failed the
/// error is [`H2hError::Conversion`] carrying the same summary.
pub fn convert_tree(
    src_dir: impl AsRef<Path>,
    dst_dir: impl AsRef<Path>,
    config: &ConvertConfig,
) -> Result<ConversionSummary> {
    let src_dir = src_dir.as_ref();
    let dst_dir = dst_dir.as_ref();

    config.validate()?;
    io::fs::create_dir_all(dst_dir)?;

    let converter = MarkdownConverter::from_config(config);
    let files = collect_files(
        src_dir,
        &config.file_extension,
        nested_output_dir(src_dir, dst_dir),
    )?;

    debug!(
        "Converting {} files from {} to {} ({} -> {}, {})",
        files.len(),
        src_dir.display(),
        dst_dir.display(),
        config.source_format,
        config.target_format,
        config.direction
    );

    let summary = run_workers(&converter, &files, src_dir, dst_dir, config.max_concurrency);

    info!("Processed {} files", summary.converted);

    if summary.is_success() {
        Ok(summary)
    } else {
        Err(H2hError::Conversion { summary })
    }
}

fn run_workers(
    converter: &MarkdownConverter,
    files: &[PathBuf],
    src_dir: &Path,
    dst_dir: &Path,
    max_concurrency: usize,
) -> ConversionSummary {
    let workers = max_concurrency.min(files.len());
    let next = AtomicUsize::new(0);
    let converted = AtomicUsize::new(0);
    let failures = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                let Some(src_path) = files.get(index) else {
                    break;
                };

                let dst_path = mirror_path(src_dir, src_path, dst_dir);
                debug!("Processing file: {}", src_path.display());

                match convert_file(converter, src_path, &dst_path) {
                    Ok(()) => {
                        converted.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(error) => {
                        let failure = FileFailure::new(src_path.clone(), error);
                        warn!("{}", failure);
                        failures
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(failure);
                    }
                }
            });
        }
    });

    let mut failures = failures
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    failures.sort_by(|a, b| a.path.cmp(&b.path));

    ConversionSummary {
        converted: converted.into_inner(),
        failures,
    }
}

// The output tree must not be walked as input when it lives inside the
// source tree.
fn nested_output_dir<'a>(src_dir: &Path, dst_dir: &'a Path) -> Option<&'a Path> {
    let src = src_dir.canonicalize().ok()?;
    let dst = dst_dir.canonicalize().ok()?;
    (dst != src && dst.starts_with(&src)).then_some(dst_dir)
}
