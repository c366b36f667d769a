use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context as _;

use crate::foundation::{
    core::Frame,
    error::{PreviewError, PreviewResult},
};

/// Somewhere a titled frame can be shown.
///
/// Each distinct title is a separate window. Showing a frame under a title that was
/// already used replaces that window's contents.
pub trait DisplaySurface {
    /// Present `frame` in the window named `title`.
    fn show(&mut self, title: &str, frame: &Frame) -> PreviewResult<()>;
}

impl<T: DisplaySurface + ?Sized> DisplaySurface for Box<T> {
    fn show(&mut self, title: &str, frame: &Frame) -> PreviewResult<()> {
        (**self).show(title, frame)
    }
}

/// Writes every shown frame as `<root>/<title>/<n>.png`.
///
/// `n` counts per title, starting from zero, so a run leaves one numbered image sequence
/// per preview window.
#[derive(Debug)]
pub struct PngDirSurface {
    root: PathBuf,
    counters: HashMap<String, u64>,
}

impl PngDirSurface {
    /// Surface rooted at `root`. Directories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            counters: HashMap::new(),
        }
    }

    /// Root directory frames are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of frames written under `title` so far.
    pub fn frames_written(&self, title: &str) -> u64 {
        self.counters.get(title).copied().unwrap_or(0)
    }
}

impl DisplaySurface for PngDirSurface {
    fn show(&mut self, title: &str, frame: &Frame) -> PreviewResult<()> {
        let dir = self.root.join(sanitize_title(title));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create preview dir '{}'", dir.display()))?;

        let n = self.counters.entry(title.to_string()).or_insert(0);
        let path = dir.join(format!("{:06}.png", *n));

        image::save_buffer_with_format(
            &path,
            frame.as_image().as_raw(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| PreviewError::display(format!("write png '{}': {e}", path.display())))?;

        *n += 1;
        tracing::trace!(title, path = %path.display(), "wrote preview frame");
        Ok(())
    }
}

fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// One recorded [`DisplaySurface::show`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShownFrame {
    /// Window title the frame was shown under.
    pub title: String,
    /// Width of the frame as received by the surface.
    pub width: u32,
    /// Height of the frame as received by the surface.
    pub height: u32,
}

/// In-memory surface that records calls instead of drawing.
///
/// Clones share the same log, so a handle kept outside a previewer observes what the
/// previewer showed.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    shown: Arc<Mutex<Vec<ShownFrame>>>,
}

impl RecordingSurface {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every call recorded so far, in order.
    pub fn shown(&self) -> Vec<ShownFrame> {
        match self.shown.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of calls recorded so far.
    pub fn len(&self) -> usize {
        self.shown().len()
    }

    /// `true` when nothing has been shown.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DisplaySurface for RecordingSurface {
    fn show(&mut self, title: &str, frame: &Frame) -> PreviewResult<()> {
        let mut shown = self
            .shown
            .lock()
            .map_err(|_| PreviewError::display("recording surface lock poisoned"))?;
        shown.push(ShownFrame {
            title: title.to_string(),
            width: frame.width(),
            height: frame.height(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/display/surface.rs"]
mod tests;
