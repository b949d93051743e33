//! Window-relative scaling and the per-frame crop of the display buffer.
//!
//! `crop_frame` is a pure function of its inputs so the paths that matter
//! most (end-of-range padding, oversized windows) are unit-testable
//! without a window.

use anyhow::{Context, Result};
use fast_image_resize as fir;
use image::{Rgba, RgbaImage, imageops};

/// Window-size change below this is ignored to avoid rescaling every frame.
pub const RESIZE_THRESHOLD: u32 = 10;

/// Current offsets into the display buffer plus the last-known window size.
///
/// The window size doubles as the fallback when geometry cannot be read
/// for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub x: u32,
    pub y: u32,
    pub win_w: u32,
    pub win_h: u32,
}

impl ViewportState {
    #[must_use]
    pub fn new(win_w: u32, win_h: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            win_w: win_w.max(1),
            win_h: win_h.max(1),
        }
    }

    /// Clamp both offsets to `[0, max(0, buffer - window)]`.
    pub fn clamp_to(&mut self, buf_w: u32, buf_h: u32) {
        self.x = self.x.min(buf_w.saturating_sub(self.win_w));
        self.y = self.y.min(buf_h.saturating_sub(self.win_h));
    }

    /// Center the view on the buffer, for the first tiled frame.
    pub fn center_on(&mut self, buf_w: u32, buf_h: u32) {
        self.x = buf_w.saturating_sub(self.win_w) / 2;
        self.y = buf_h.saturating_sub(self.win_h) / 2;
    }
}

/// True when the window moved far enough from the last rescale size to
/// warrant rebuilding the display buffer.
#[must_use]
pub fn needs_rescale(last: (u32, u32), now: (u32, u32)) -> bool {
    last.0.abs_diff(now.0) > RESIZE_THRESHOLD || last.1.abs_diff(now.1) > RESIZE_THRESHOLD
}

/// Scroll mode fits the composite to the window width; the factor applies
/// to both axes and may upscale.
#[must_use]
pub fn scroll_scale(composite_w: u32, win_w: u32) -> f32 {
    win_w.max(1) as f32 / composite_w.max(1) as f32
}

/// Tiled mode fits within the window but never upscales.
#[must_use]
pub fn tiled_scale(composite_w: u32, composite_h: u32, win_w: u32, win_h: u32) -> f32 {
    let sw = win_w.max(1) as f32 / composite_w.max(1) as f32;
    let sh = win_h.max(1) as f32 / composite_h.max(1) as f32;
    sw.min(sh).min(1.0)
}

/// Produce the display buffer for `scale` by resampling the composite.
///
/// # Errors
/// Fails only if the resize pipeline rejects the buffers.
pub fn rescale(composite: &RgbaImage, scale: f32) -> Result<RgbaImage> {
    let target_w = ((composite.width() as f32 * scale).round() as u32).max(1);
    let target_h = ((composite.height() as f32 * scale).round() as u32).max(1);
    if target_w == composite.width() && target_h == composite.height() {
        return Ok(composite.clone());
    }

    let src_view = fir::images::ImageRef::new(
        composite.width(),
        composite.height(),
        composite.as_raw(),
        fir::PixelType::U8x4,
    )
    .context("failed to create source view for display rescale")?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options = fir::ResizeOptions::new()
        .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::CatmullRom));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .context("display rescale failed")?;
    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .context("failed to construct rescaled display buffer")
}

/// Cut the window-sized frame at `(off_x, off_y)` out of the buffer.
///
/// The visible region is clamped to the buffer; any shortfall on the right
/// or bottom is filled with `background`. The result is always exactly
/// `win_w` by `win_h`.
#[must_use]
pub fn crop_frame(
    buffer: &RgbaImage,
    win_w: u32,
    win_h: u32,
    off_x: u32,
    off_y: u32,
    background: Rgba<u8>,
) -> RgbaImage {
    let win_w = win_w.max(1);
    let win_h = win_h.max(1);
    let off_x = off_x.min(buffer.width());
    let off_y = off_y.min(buffer.height());
    let vis_w = win_w.min(buffer.width() - off_x);
    let vis_h = win_h.min(buffer.height() - off_y);

    let mut frame = RgbaImage::from_pixel(win_w, win_h, background);
    if vis_w > 0 && vis_h > 0 {
        let visible = imageops::crop_imm(buffer, off_x, off_y, vis_w, vis_h);
        imageops::overlay(&mut frame, &visible.to_image(), 0, 0);
    }
    frame
}
