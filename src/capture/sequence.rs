use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::{CaptureSource, Frame},
    error::{PreviewError, PreviewResult},
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "tga", "gif"];

/// Capture backed by a list of still images, played back in order.
///
/// The native resolution is taken from the first image; every later frame must match it.
#[derive(Debug)]
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    next: usize,
    width: u32,
    height: u32,
}

impl ImageSequence {
    /// Sequence over explicit paths, in the given order.
    pub fn from_paths(paths: Vec<PathBuf>) -> PreviewResult<Self> {
        let first = paths
            .first()
            .ok_or_else(|| PreviewError::capture("image sequence is empty"))?;
        let (width, height) = image::image_dimensions(first)
            .with_context(|| format!("read dimensions of '{}'", first.display()))?;
        if width == 0 || height == 0 {
            return Err(PreviewError::capture(format!(
                "'{}' has zero-sized dimensions",
                first.display()
            )));
        }
        tracing::debug!(frames = paths.len(), width, height, "opened image sequence");
        Ok(Self {
            paths,
            next: 0,
            width,
            height,
        })
    }

    /// Sequence over the image files directly inside `dir`, sorted by file name.
    pub fn from_dir(dir: &Path) -> PreviewResult<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("read capture dir '{}'", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("list capture dir '{}'", dir.display()))?
                .path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(PreviewError::capture(format!(
                "no images found in '{}'",
                dir.display()
            )));
        }
        Self::from_paths(paths)
    }

    /// Total number of frames.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` when the sequence holds no frames. Never true for a constructed sequence.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Frames not yet returned by [`ImageSequence::next_frame`].
    pub fn remaining(&self) -> usize {
        self.paths.len() - self.next
    }

    /// Decode the next frame, or `Ok(None)` once the sequence is exhausted.
    pub fn next_frame(&mut self) -> PreviewResult<Option<Frame>> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        let img = image::open(path).with_context(|| format!("decode '{}'", path.display()))?;
        if img.width() != self.width || img.height() != self.height {
            return Err(PreviewError::capture(format!(
                "'{}' is {}x{}, expected {}x{}",
                path.display(),
                img.width(),
                img.height(),
                self.width,
                self.height
            )));
        }
        self.next += 1;
        Ok(Some(Frame::from_dynamic(img)))
    }
}

impl CaptureSource for ImageSequence {
    fn frame_width(&self) -> u32 {
        self.width
    }

    fn frame_height(&self) -> u32 {
        self.height
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/sequence.rs"]
mod tests;
