use crate::foundation::{
    core::{CaptureInfo, PreviewSize, ScreenSize},
    error::{PreviewError, PreviewResult},
};

/// Fit a capture of native size `capture` into `target`, keeping its aspect ratio, then
/// shrink both dimensions by `shrink_factor`.
///
/// The tighter of the two axis scales binds: that axis keeps the target dimension and the
/// other is scaled by the same ratio. Results are truncated toward zero.
pub fn compute_preview_size(
    target: ScreenSize,
    capture: CaptureInfo,
    shrink_factor: f64,
) -> PreviewResult<PreviewSize> {
    if capture.frame_width == 0 || capture.frame_height == 0 {
        return Err(PreviewError::sizing(format!(
            "capture dimensions must be non-zero, got {}x{}",
            capture.frame_width, capture.frame_height
        )));
    }
    if !shrink_factor.is_finite() || shrink_factor <= 0.0 || shrink_factor > 1.0 {
        return Err(PreviewError::sizing(format!(
            "shrink factor must be in (0, 1], got {shrink_factor}"
        )));
    }

    let cw = f64::from(capture.frame_width);
    let ch = f64::from(capture.frame_height);
    let mut width = f64::from(target.width);
    let mut height = f64::from(target.height);

    let width_scale = width / cw;
    let height_scale = height / ch;

    if width_scale < height_scale {
        height = ch * width_scale;
    } else {
        width = cw * height_scale;
    }

    let size = PreviewSize {
        width: (width * shrink_factor) as u32,
        height: (height * shrink_factor) as u32,
    };
    if size.is_degenerate() {
        return Err(PreviewError::sizing(format!(
            "capture {}x{} does not fit target {}x{} with a visible preview",
            capture.frame_width, capture.frame_height, target.width, target.height
        )));
    }
    Ok(size)
}

#[cfg(test)]
#[path = "../../tests/unit/preview/sizing.rs"]
mod tests;
