use crate::{
    config::{
        options::PreviewOptions,
        runtime::{DISPLAY_KEY, RuntimeConfig, bool_option},
    },
    display::{screen::ScreenProbe, surface::DisplaySurface},
    foundation::{
        core::{CaptureInfo, Frame, PreviewSize, ScreenSize},
        error::{PreviewError, PreviewResult},
    },
    pipeline::stage::{Stage, StageResult},
    preview::sizing::compute_preview_size,
};

/// Wraps a [`Stage`] and shows its frame outputs after every execution.
///
/// The wrapped stage always runs first and its result is returned unchanged. Preview work
/// happens afterwards, and only when display is enabled and a display server is attached.
///
/// Two values are computed on the first preview and then kept for the life of the wrapper:
///
/// - the preview size, fitted from the capture resolution into the target (explicit
///   override or probed screen);
/// - the list of frame outputs, i.e. the declared outputs that held a frame at the first
///   execution where at least one did.
///
/// Neither is recomputed, even if the capture, screen or stage outputs change later.
pub struct ResultPreviewer<S> {
    stage: S,
    options: PreviewOptions,
    surface: Box<dyn DisplaySurface>,
    screen: Box<dyn ScreenProbe>,
    display_enabled: bool,
    capture: Option<CaptureInfo>,
    preview_size: Option<PreviewSize>,
    frame_outputs: Option<Vec<&'static str>>,
}

impl<S: Stage> ResultPreviewer<S> {
    /// Wrap `stage`, showing frames on `surface` sized against `screen`.
    pub fn new(
        stage: S,
        options: PreviewOptions,
        surface: impl DisplaySurface + 'static,
        screen: impl ScreenProbe + 'static,
    ) -> PreviewResult<Self> {
        options.validate()?;
        Ok(Self {
            stage,
            options,
            surface: Box::new(surface),
            screen: Box::new(screen),
            display_enabled: true,
            capture: None,
            preview_size: None,
            frame_outputs: None,
        })
    }

    /// Whether previews are currently enabled.
    pub fn display_enabled(&self) -> bool {
        self.display_enabled
    }

    /// Options the wrapper was built with.
    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Cached preview size, once computed.
    pub fn preview_size(&self) -> Option<PreviewSize> {
        self.preview_size
    }

    /// Cached frame output names, once discovered.
    pub fn cached_frame_outputs(&self) -> Option<&[&'static str]> {
        self.frame_outputs.as_deref()
    }

    /// Borrow the wrapped stage.
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Mutably borrow the wrapped stage.
    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    /// Unwrap, discarding preview state.
    pub fn into_inner(self) -> S {
        self.stage
    }

    fn ensure_preview_size(&mut self) -> PreviewResult<PreviewSize> {
        if let Some(size) = self.preview_size {
            return Ok(size);
        }

        let capture = self.capture.ok_or_else(|| {
            PreviewError::sizing(format!(
                "stage '{}' has no capture source; cannot size previews",
                self.stage.name()
            ))
        })?;
        let target: ScreenSize = match self.options.target {
            Some(t) => t,
            None => self.screen.screen_size()?,
        };

        let size = compute_preview_size(target, capture, self.options.shrink_factor)?;
        tracing::debug!(
            stage = self.stage.name(),
            target_width = target.width,
            target_height = target.height,
            width = size.width,
            height = size.height,
            "computed preview size"
        );
        self.preview_size = Some(size);
        Ok(size)
    }

    /// Declared outputs holding a frame. An empty scan is not cached, so stages whose first
    /// executions produce nothing are rescanned until one does.
    fn ensure_frame_outputs(&mut self) -> Vec<&'static str> {
        if let Some(cached) = &self.frame_outputs {
            return cached.clone();
        }

        let stage = &self.stage;
        let found: Vec<&'static str> = stage
            .frame_outputs()
            .iter()
            .copied()
            .filter(|name| stage.frame(name).is_some())
            .collect();
        if !found.is_empty() {
            tracing::debug!(stage = stage.name(), outputs = ?found, "discovered frame outputs");
            self.frame_outputs = Some(found.clone());
        }
        found
    }

    fn show_frames(&mut self) -> PreviewResult<()> {
        let size = self.ensure_preview_size()?;
        let outputs = self.ensure_frame_outputs();
        let stage_name = self.stage.name().to_string();

        for output in outputs {
            let frame: &Frame = self.stage.frame(output).ok_or_else(|| {
                PreviewError::stage(format!(
                    "stage '{stage_name}' no longer holds a frame in output '{output}'"
                ))
            })?;
            let resized = frame.resized(size)?;
            let title = format!("{stage_name}.{output}");
            tracing::trace!(title = %title, "showing preview");
            self.surface.show(&title, &resized)?;
        }
        Ok(())
    }
}

impl<S: Stage> Stage for ResultPreviewer<S> {
    fn name(&self) -> &str {
        self.stage.name()
    }

    #[tracing::instrument(skip(self), fields(stage = self.stage.name()))]
    fn execute(&mut self) -> PreviewResult<StageResult> {
        let result = self.stage.execute()?;

        if !self.display_enabled || self.options.headless {
            return Ok(result);
        }

        self.show_frames()?;
        Ok(result)
    }

    fn frame_outputs(&self) -> &[&'static str] {
        self.stage.frame_outputs()
    }

    fn frame(&self, name: &str) -> Option<&Frame> {
        self.stage.frame(name)
    }

    fn set_runtime_configuration(&mut self, config: &RuntimeConfig) -> PreviewResult<()> {
        if let Some(display) = bool_option(config, DISPLAY_KEY)? {
            self.display_enabled = display;
        }
        self.stage.set_runtime_configuration(config)
    }

    fn set_capture_source(&mut self, capture: CaptureInfo) {
        self.capture = Some(capture);
        self.stage.set_capture_source(capture);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/previewer.rs"]
mod tests;
