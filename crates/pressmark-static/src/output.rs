//! Output directory reset.

use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// Make sure `output_root` exists and holds nothing from a previous build.
///
/// Only the entries are removed; the root itself is kept. A failure part way
/// through leaves the directory partially cleared.
pub fn reset_output_dir(output_root: &Path) -> Result<(), BuildError> {
    let fail = |source: std::io::Error| {
        tracing::error!(
            "Failed to reset output directory {}: {}",
            output_root.display(),
            source
        );
        BuildError::DirReset {
            path: output_root.to_path_buf(),
            source,
        }
    };

    fs::create_dir_all(output_root).map_err(fail)?;

    let mut removed = 0;
    for entry in fs::read_dir(output_root).map_err(fail)? {
        let entry = entry.map_err(fail)?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(fail)?;

        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(fail)?;
        } else {
            fs::remove_file(&path).map_err(fail)?;
        }
        removed += 1;
    }

    tracing::debug!(
        "Cleared {} entries from {}",
        removed,
        output_root.display()
    );

    Ok(())
}
