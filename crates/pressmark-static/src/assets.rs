//! Static asset mirroring from the source root into the output tree.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::BuildError;

/// Top-level source entries consumed by the page build instead of copied.
pub const RESERVED_DIRS: [&str; 2] = ["templates", "pages"];

/// Outcome of copying a set of entries.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Number of files copied
    pub copied: usize,

    /// One error per entry that could not be copied
    pub failures: Vec<BuildError>,
}

impl CopyReport {
    fn merge(&mut self, other: CopyReport) {
        self.copied += other.copied;
        self.failures.extend(other.failures);
    }

    fn failed(error: BuildError) -> Self {
        Self {
            copied: 0,
            failures: vec![error],
        }
    }
}

/// Copy one file byte for byte, creating the destination's parent first.
///
/// An existing destination is overwritten.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64, BuildError> {
    let copy_error = |source| BuildError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(copy_error)?;
    }

    let bytes = fs::copy(src, dst).map_err(copy_error)?;
    tracing::debug!("Copied {} -> {}", src.display(), dst.display());
    Ok(bytes)
}

/// Recursively mirror `src_dir` into `dst_dir`.
///
/// Hidden entries are included and empty directories are recreated. A
/// failing entry is recorded and its siblings are still copied.
pub fn copy_directory(src_dir: &Path, dst_dir: &Path) -> CopyReport {
    mirror(src_dir, dst_dir, None)
}

/// Walk `src_dir` into `dst_dir`, pruning the directory `skip` (canonical).
fn mirror(src_dir: &Path, dst_dir: &Path, skip: Option<&Path>) -> CopyReport {
    let mut report = CopyReport::default();
    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();

    let walker = WalkDir::new(src_dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir() && is_skipped(entry.path(), skip))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let src = e.path().unwrap_or(src_dir).to_path_buf();
                let dst = target_path(src_dir, dst_dir, &src);
                report.failures.push(BuildError::Copy {
                    src,
                    dst,
                    source: e.into(),
                });
                continue;
            }
        };

        let dst = target_path(src_dir, dst_dir, entry.path());

        if entry.file_type().is_dir() {
            if let Err(source) = fs::create_dir_all(&dst) {
                report.failures.push(BuildError::Copy {
                    src: entry.path().to_path_buf(),
                    dst,
                    source,
                });
            }
        } else {
            files.push((entry.into_path(), dst));
        }
    }

    let results: Vec<Result<u64, BuildError>> = files
        .par_iter()
        .map(|(src, dst)| copy_file(src, dst))
        .collect();

    for result in results {
        match result {
            Ok(_) => report.copied += 1,
            Err(e) => report.failures.push(e),
        }
    }

    report
}

fn is_skipped(path: &Path, skip: Option<&Path>) -> bool {
    match skip {
        Some(skip) => fs::canonicalize(path).is_ok_and(|p| p == skip),
        None => false,
    }
}

/// Mirror every top-level entry of `source_root` except [`RESERVED_DIRS`].
///
/// When `output_root` lives under `source_root` it is left out, so nothing
/// is read back from the output tree.
pub fn copy_site_assets(source_root: &Path, output_root: &Path) -> CopyReport {
    let entries = match fs::read_dir(source_root) {
        Ok(entries) => entries,
        Err(source) => {
            return CopyReport::failed(BuildError::Copy {
                src: source_root.to_path_buf(),
                dst: output_root.to_path_buf(),
                source,
            });
        }
    };

    let output_canonical = fs::canonicalize(output_root).ok();
    let skip = output_canonical.as_deref();

    let mut selected = Vec::new();
    let mut report = CopyReport::default();

    for entry in entries {
        match entry {
            Ok(entry) => {
                let name = entry.file_name();
                if RESERVED_DIRS.iter().any(|reserved| name == *reserved) {
                    tracing::debug!("Skipping reserved entry {}", entry.path().display());
                    continue;
                }
                if is_skipped(&entry.path(), skip) {
                    tracing::debug!("Skipping output directory {}", entry.path().display());
                    continue;
                }
                selected.push(entry.path());
            }
            Err(source) => report.failures.push(BuildError::Copy {
                src: source_root.to_path_buf(),
                dst: output_root.to_path_buf(),
                source,
            }),
        }
    }

    let reports: Vec<CopyReport> = selected
        .par_iter()
        .map(|src| {
            let dst = target_path(source_root, output_root, src);
            if src.is_dir() {
                mirror(src, &dst, skip)
            } else {
                match copy_file(src, &dst) {
                    Ok(_) => CopyReport {
                        copied: 1,
                        failures: Vec::new(),
                    },
                    Err(e) => CopyReport::failed(e),
                }
            }
        })
        .collect();

    for r in reports {
        report.merge(r);
    }

    report
}

fn target_path(src_root: &Path, dst_root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(src_root) {
        Ok(relative) if relative.as_os_str().is_empty() => dst_root.to_path_buf(),
        Ok(relative) => dst_root.join(relative),
        Err(_) => dst_root.to_path_buf(),
    }
}
