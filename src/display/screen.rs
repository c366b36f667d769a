use crate::foundation::{
    core::ScreenSize,
    error::{PreviewError, PreviewResult},
};

/// Queries the resolution of the attached display.
pub trait ScreenProbe {
    /// Current screen resolution.
    fn screen_size(&self) -> PreviewResult<ScreenSize>;
}

impl<T: ScreenProbe + ?Sized> ScreenProbe for Box<T> {
    fn screen_size(&self) -> PreviewResult<ScreenSize> {
        (**self).screen_size()
    }
}

/// Probe that always reports the same resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedScreen(pub ScreenSize);

impl FixedScreen {
    /// Probe reporting `width`x`height`.
    pub fn new(width: u32, height: u32) -> PreviewResult<Self> {
        Ok(Self(ScreenSize::new(width, height)?))
    }
}

impl ScreenProbe for FixedScreen {
    fn screen_size(&self) -> PreviewResult<ScreenSize> {
        Ok(self.0)
    }
}

/// Probe for hosts with no known screen; every query fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScreen;

impl ScreenProbe for NoScreen {
    fn screen_size(&self) -> PreviewResult<ScreenSize> {
        Err(PreviewError::display(
            "no screen available; set WIDTH and HEIGHT to size previews",
        ))
    }
}
