use image::{Rgba, RgbaImage};
use sheetscroll::viewport::{
    ViewportState, crop_frame, needs_rescale, rescale, scroll_scale, tiled_scale,
};

const BG: Rgba<u8> = Rgba([200, 200, 200, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[test]
fn crop_is_always_window_sized() {
    let buffer = RgbaImage::from_pixel(40, 30, RED);
    for (win_w, win_h, off_x, off_y) in [
        (10, 10, 0, 0),
        (10, 10, 35, 25),
        (10, 10, 40, 30),
        (100, 100, 0, 0),
        (1, 1, 39, 29),
    ] {
        let frame = crop_frame(&buffer, win_w, win_h, off_x, off_y, BG);
        assert_eq!((frame.width(), frame.height()), (win_w, win_h));
    }
}

#[test]
fn shortfall_pads_right_and_bottom() {
    let buffer = RgbaImage::from_pixel(4, 4, RED);
    let frame = crop_frame(&buffer, 6, 6, 0, 0, BG);
    assert_eq!(*frame.get_pixel(3, 3), RED);
    assert_eq!(*frame.get_pixel(4, 0), BG);
    assert_eq!(*frame.get_pixel(0, 4), BG);
    assert_eq!(*frame.get_pixel(5, 5), BG);
}

#[test]
fn crop_past_the_end_is_all_background() {
    let buffer = RgbaImage::from_pixel(4, 4, RED);
    let frame = crop_frame(&buffer, 3, 3, 4, 4, BG);
    assert!(frame.pixels().all(|p| *p == BG));
}

#[test]
fn bottom_of_range_shows_final_rows() {
    let mut buffer = RgbaImage::from_pixel(4, 10, BG);
    for x in 0..4 {
        buffer.put_pixel(x, 9, RED);
    }
    // Window of 3 at offset 8: rows 8..10 visible, one padded row below.
    let frame = crop_frame(&buffer, 4, 3, 0, 8, BG);
    assert_eq!(*frame.get_pixel(0, 1), RED);
    assert_eq!(*frame.get_pixel(0, 2), BG);
}

#[test]
fn scroll_scale_fits_width_and_may_upscale() {
    assert!((scroll_scale(100, 200) - 2.0).abs() < f32::EPSILON);
    assert!((scroll_scale(400, 100) - 0.25).abs() < f32::EPSILON);
}

#[test]
fn tiled_scale_never_upscales() {
    // Composite smaller than the window: stays at 1.0.
    assert!((tiled_scale(100, 100, 500, 500) - 1.0).abs() < f32::EPSILON);
    // Bounded by the tighter axis.
    assert!((tiled_scale(1000, 500, 500, 500) - 0.5).abs() < f32::EPSILON);
    assert!((tiled_scale(500, 1000, 500, 500) - 0.5).abs() < f32::EPSILON);
}

#[test]
fn rescale_threshold_is_ten_pixels() {
    assert!(!needs_rescale((800, 1000), (805, 1008)));
    assert!(!needs_rescale((800, 1000), (810, 1000)));
    assert!(needs_rescale((800, 1000), (811, 1000)));
    assert!(needs_rescale((800, 1000), (800, 989)));
}

#[test]
fn rescale_produces_scaled_dimensions() {
    let composite = RgbaImage::from_pixel(100, 50, RED);
    let buffer = rescale(&composite, 2.0).unwrap();
    assert_eq!((buffer.width(), buffer.height()), (200, 100));

    let same = rescale(&composite, 1.0).unwrap();
    assert_eq!((same.width(), same.height()), (100, 50));

    let tiny = rescale(&composite, 0.001).unwrap();
    assert_eq!((tiny.width(), tiny.height()), (1, 1));
}

#[test]
fn offsets_clamp_to_buffer_minus_window() {
    let mut vp = ViewportState::new(100, 80);
    vp.x = 500;
    vp.y = 500;
    vp.clamp_to(300, 200);
    assert_eq!((vp.x, vp.y), (200, 120));

    // Buffer smaller than the window clamps to zero.
    vp.x = 50;
    vp.y = 50;
    vp.clamp_to(40, 40);
    assert_eq!((vp.x, vp.y), (0, 0));
}

#[test]
fn center_on_splits_the_overflow() {
    let mut vp = ViewportState::new(100, 100);
    vp.center_on(300, 150);
    assert_eq!((vp.x, vp.y), (100, 25));

    vp.center_on(50, 50);
    assert_eq!((vp.x, vp.y), (0, 0));
}
