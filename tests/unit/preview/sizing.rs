use super::*;

fn capture(w: u32, h: u32) -> CaptureInfo {
    CaptureInfo {
        frame_width: w,
        frame_height: h,
    }
}

fn screen(w: u32, h: u32) -> ScreenSize {
    ScreenSize {
        width: w,
        height: h,
    }
}

#[test]
fn matching_aspect_shrinks_both_dimensions() {
    let size = compute_preview_size(screen(1920, 1080), capture(1920, 1080), 0.85).unwrap();
    assert_eq!(
        size,
        PreviewSize {
            width: 1632,
            height: 918
        }
    );
}

#[test]
fn narrow_target_binds_on_width() {
    // width scale 2/3 < height scale 1: height follows the width scale.
    let size = compute_preview_size(screen(1280, 1080), capture(1920, 1080), 0.85).unwrap();
    assert_eq!(size.width, 1088);
    assert_eq!(size.height, 612);
}

#[test]
fn short_target_binds_on_height() {
    let size = compute_preview_size(screen(1920, 1080), capture(640, 480), 0.85).unwrap();
    assert_eq!(
        size,
        PreviewSize {
            width: 1224,
            height: 918
        }
    );
}

#[test]
fn aspect_ratio_is_preserved_without_shrink() {
    let size = compute_preview_size(screen(1000, 1000), capture(400, 200), 1.0).unwrap();
    assert_eq!(
        size,
        PreviewSize {
            width: 1000,
            height: 500
        }
    );
}

#[test]
fn zero_capture_dimension_is_an_error() {
    let err = compute_preview_size(screen(1920, 1080), capture(0, 1080), 0.85).unwrap_err();
    assert!(matches!(err, PreviewError::Sizing(_)));
    assert!(compute_preview_size(screen(1920, 1080), capture(1920, 0), 0.85).is_err());
}

#[test]
fn bad_shrink_factor_is_an_error() {
    assert!(compute_preview_size(screen(10, 10), capture(10, 10), 0.0).is_err());
    assert!(compute_preview_size(screen(10, 10), capture(10, 10), 2.0).is_err());
}

#[test]
fn extreme_aspect_collapsing_to_zero_is_an_error() {
    let err = compute_preview_size(screen(100, 100), capture(100_000, 10), 0.85).unwrap_err();
    assert!(matches!(err, PreviewError::Sizing(_)));
}
