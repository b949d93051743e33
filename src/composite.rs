//! Builds the single composite raster a session scrolls or pans over.

use std::path::Path;

use image::{Rgba, RgbaImage, imageops};
use tracing::{debug, warn};

use crate::error::Error;
use crate::imageset::ImageSet;

/// Background behind and below the scroll strip.
pub const SCROLL_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Background behind the tiled overview.
pub const TILED_BACKGROUND: Rgba<u8> = Rgba([200, 200, 200, 255]);

fn decode(path: &Path) -> Result<RgbaImage, Error> {
    match image::open(path) {
        Ok(img) => Ok(img.to_rgba8()),
        Err(source) => Err(Error::Decode {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Stack all pages vertically: width = widest page, height = sum of page
/// heights, each page horizontally centered on a white canvas.
///
/// # Errors
/// Any undecodable page aborts the whole build with [`Error::Decode`];
/// a half-built scroll strip is worse than no strip.
pub fn build_scroll(set: &ImageSet) -> Result<RgbaImage, Error> {
    let mut pages = Vec::with_capacity(set.len());
    let mut max_width: u32 = 0;
    let mut total_height: u32 = 0;
    for page_ref in set.iter() {
        let page = decode(&page_ref.path)?;
        max_width = max_width.max(page.width());
        total_height += page.height();
        pages.push(page);
    }

    let mut canvas = RgbaImage::from_pixel(max_width.max(1), total_height.max(1), SCROLL_BACKGROUND);
    let mut y: i64 = 0;
    for page in &pages {
        let x = i64::from((max_width - page.width()) / 2);
        imageops::overlay(&mut canvas, page, x, y);
        y += i64::from(page.height());
    }
    debug!(
        pages = pages.len(),
        width = canvas.width(),
        height = canvas.height(),
        "built scroll composite"
    );
    Ok(canvas)
}

/// Lay all pages out side by side: height = tallest page, width = sum of
/// page widths, each page top-aligned on a light-gray canvas.
///
/// Pages that fail to decode are skipped with a warning; the overview
/// shows what it can. The build only fails if nothing decodes.
///
/// # Errors
/// Returns the last [`Error::Decode`] when every page is unreadable.
pub fn build_tiled(set: &ImageSet) -> Result<RgbaImage, Error> {
    let mut pages = Vec::with_capacity(set.len());
    let mut max_height: u32 = 0;
    let mut total_width: u32 = 0;
    let mut last_err = None;
    for page_ref in set.iter() {
        match decode(&page_ref.path) {
            Ok(page) => {
                max_height = max_height.max(page.height());
                total_width += page.width();
                pages.push(page);
            }
            Err(err) => {
                warn!(path = %page_ref.path.display(), "skipping undecodable page: {err}");
                last_err = Some(err);
            }
        }
    }
    if pages.is_empty()
        && let Some(err) = last_err
    {
        return Err(err);
    }

    let mut canvas = RgbaImage::from_pixel(total_width.max(1), max_height.max(1), TILED_BACKGROUND);
    let mut x: i64 = 0;
    for page in &pages {
        imageops::overlay(&mut canvas, page, x, 0);
        x += i64::from(page.width());
    }
    debug!(
        pages = pages.len(),
        width = canvas.width(),
        height = canvas.height(),
        "built tiled composite"
    );
    Ok(canvas)
}
