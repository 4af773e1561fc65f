//! Errors raised by the page build pipeline.

use std::io;
use std::path::PathBuf;

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to parse config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to reset output directory {}: {source}", path.display())]
    DirReset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No menu entry with path '{stem}'")]
    RouteNotFound { stem: String },

    #[error("Failed to render template {}: {source}", template.display())]
    Render {
        template: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error(
        "Output directory {} would overwrite source directory {}",
        output_dir.display(),
        source_dir.display()
    )]
    OutputOverlapsSource {
        source_dir: PathBuf,
        output_dir: PathBuf,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
