use std::str::FromStr;

use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::foundation::error::{PreviewError, PreviewResult};

/// Owned RGBA8 image produced by a pipeline stage.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    image: RgbaImage,
}

impl Frame {
    /// Wrap an RGBA8 buffer.
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Convert any decoded image into an RGBA8 frame.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    /// Frame filled with a single straight-alpha RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(rgba)),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying buffer.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the frame and return the underlying buffer.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Bilinear resize to `size`.
    ///
    /// Fails on a zero-area target instead of producing an empty buffer.
    pub fn resized(&self, size: PreviewSize) -> PreviewResult<Frame> {
        if size.is_degenerate() {
            return Err(PreviewError::sizing(format!(
                "cannot resize frame to degenerate size {}x{}",
                size.width, size.height
            )));
        }
        if size.width == self.width() && size.height == self.height() {
            return Ok(self.clone());
        }
        Ok(Frame::new(image::imageops::resize(
            &self.image,
            size.width,
            size.height,
            FilterType::Triangle,
        )))
    }
}

/// Size of the preview surface a frame is resized to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PreviewSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PreviewSize {
    /// `true` when either dimension is zero.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Target area the preview must fit in, usually the host screen resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenSize {
    /// Build a size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> PreviewResult<Self> {
        if width == 0 || height == 0 {
            return Err(PreviewError::config(format!(
                "screen size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

impl FromStr for ScreenSize {
    type Err = PreviewError;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| PreviewError::config(format!("expected WIDTHxHEIGHT, got '{s}'")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|e| PreviewError::config(format!("invalid width '{w}': {e}")))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|e| PreviewError::config(format!("invalid height '{h}': {e}")))?;
        Self::new(width, height)
    }
}

/// Native resolution of the capture feeding the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CaptureInfo {
    /// Native frame width in pixels.
    pub frame_width: u32,
    /// Native frame height in pixels.
    pub frame_height: u32,
}

impl CaptureInfo {
    /// Snapshot the dimensions of any capture source.
    pub fn of(source: &dyn CaptureSource) -> Self {
        Self {
            frame_width: source.frame_width(),
            frame_height: source.frame_height(),
        }
    }
}

/// Anything that knows the native frame size of the input stream.
pub trait CaptureSource {
    /// Native frame width in pixels.
    fn frame_width(&self) -> u32;
    /// Native frame height in pixels.
    fn frame_height(&self) -> u32;
}

impl CaptureSource for CaptureInfo {
    fn frame_width(&self) -> u32 {
        self.frame_width
    }

    fn frame_height(&self) -> u32 {
        self.frame_height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
