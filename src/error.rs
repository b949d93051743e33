use std::path::PathBuf;

use thiserror::Error;

/// Library error type for playback operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The folder is missing, not a directory, or holds no supported image.
    #[error("no playable images in {0}")]
    NotFound(PathBuf),

    /// A page file could not be decoded.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Tiled mode was requested for a set too large to pan by hand.
    #[error("tiled mode supports at most {limit} pages, folder has {pages}")]
    InvalidMode { pages: usize, limit: usize },

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Windowing or GPU error from the presentation layer.
    #[error("render error: {0}")]
    Render(anyhow::Error),
}
