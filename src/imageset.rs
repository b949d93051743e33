//! Folder enumeration and numeric ordering of sheet-music pages.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;

/// Extensions recognized as page images (lowercase, without dot).
pub const SUPPORTED_EXTS: &[&str] = &["png", "jpg", "jpeg"];

/// A page file plus the sort key derived from its name.
///
/// The key is the first maximal run of decimal digits in the file name;
/// names without digits get `u64::MAX` so they sort after every numbered
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    pub sort_key: u64,
}

/// Ordered page list for one playback session.
#[derive(Debug, Clone)]
pub struct ImageSet {
    refs: Vec<ImageRef>,
}

impl ImageSet {
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.refs.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.refs.iter().map(|r| r.path.as_path())
    }
}

/// Return `true` if `path` has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTS.iter().any(|e| *e == ext)
        })
}

/// Extract the numeric sort key from a file name.
fn sort_key(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}

/// Enumerate the folder and return its pages in playback order.
///
/// Entries are name-sorted before the stable numeric sort, so ties between
/// equal keys resolve the same way on every filesystem.
///
/// # Errors
/// Returns [`Error::NotFound`] if `folder` is not a directory or contains
/// no supported image file.
pub fn load(folder: &Path) -> Result<ImageSet, Error> {
    if !folder.is_dir() {
        return Err(Error::NotFound(folder.to_path_buf()));
    }

    let mut refs = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .flatten()
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_supported_image(path) {
            continue;
        }
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or(u64::MAX, sort_key);
        refs.push(ImageRef {
            path: path.to_path_buf(),
            sort_key: key,
        });
    }

    if refs.is_empty() {
        return Err(Error::NotFound(folder.to_path_buf()));
    }

    // Stable: equal keys keep their enumeration order.
    refs.sort_by_key(|r| r.sort_key);
    Ok(ImageSet { refs })
}
