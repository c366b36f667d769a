use image::DynamicImage;

use crate::{
    capture::sequence::ImageSequence,
    foundation::{
        core::Frame,
        error::{PreviewError, PreviewResult},
    },
    pipeline::stage::{Stage, StageResult},
};

/// Reads the next capture frame and derives grayscale and blurred variants.
///
/// Frame outputs: `original`, `gray`, `blurred`. The execution that reads the last capture
/// frame returns [`StageResult::Halt`]; executing again after that is an error.
pub struct Preprocess {
    capture: ImageSequence,
    sigma: f32,
    original: Option<Frame>,
    gray: Option<Frame>,
    blurred: Option<Frame>,
    frames_read: u64,
}

impl Preprocess {
    /// Output names, in display order.
    pub const OUTPUTS: [&'static str; 3] = ["original", "gray", "blurred"];

    /// Stage reading from `capture`, blurring with gaussian `sigma`.
    pub fn new(capture: ImageSequence, sigma: f32) -> PreviewResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(PreviewError::config(format!(
                "blur sigma must be positive, got {sigma}"
            )));
        }
        Ok(Self {
            capture,
            sigma,
            original: None,
            gray: None,
            blurred: None,
            frames_read: 0,
        })
    }

    /// Frames consumed from the capture so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }
}

impl Stage for Preprocess {
    fn execute(&mut self) -> PreviewResult<StageResult> {
        let Some(frame) = self.capture.next_frame()? else {
            return Err(PreviewError::capture(format!(
                "capture exhausted after {} frames",
                self.frames_read
            )));
        };

        let luma = image::imageops::grayscale(frame.as_image());
        let blurred = image::imageops::blur(&luma, self.sigma);

        self.gray = Some(Frame::from_dynamic(DynamicImage::ImageLuma8(luma)));
        self.blurred = Some(Frame::from_dynamic(DynamicImage::ImageLuma8(blurred)));
        self.original = Some(frame);
        self.frames_read += 1;

        if self.capture.remaining() == 0 {
            Ok(StageResult::Halt)
        } else {
            Ok(StageResult::Continue)
        }
    }

    fn frame_outputs(&self) -> &[&'static str] {
        &Self::OUTPUTS
    }

    fn frame(&self, name: &str) -> Option<&Frame> {
        match name {
            "original" => self.original.as_ref(),
            "gray" => self.gray.as_ref(),
            "blurred" => self.blurred.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stages/preprocess.rs"]
mod tests;
