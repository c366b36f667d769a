use crate::{
    config::runtime::RuntimeConfig,
    foundation::{
        core::{CaptureInfo, Frame},
        error::PreviewResult,
    },
};

/// Outcome of one stage execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StageResult {
    /// Later stages should run.
    Continue,
    /// The pipeline should stop after this stage.
    Halt,
}

impl StageResult {
    /// `true` for [`StageResult::Continue`].
    pub fn should_continue(self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// One unit of work in a [`Pipeline`](crate::Pipeline).
///
/// Stages that produce displayable images declare them up front in
/// [`Stage::frame_outputs`] and hand out the current value through [`Stage::frame`].
pub trait Stage {
    /// Human-readable stage name; used to title preview windows.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Run the stage once.
    fn execute(&mut self) -> PreviewResult<StageResult>;

    /// Names of outputs that can hold a [`Frame`].
    fn frame_outputs(&self) -> &[&'static str] {
        &[]
    }

    /// Current frame for output `name`, if it holds one.
    fn frame(&self, _name: &str) -> Option<&Frame> {
        None
    }

    /// Receive runtime options before the first execution.
    fn set_runtime_configuration(&mut self, _config: &RuntimeConfig) -> PreviewResult<()> {
        Ok(())
    }

    /// Receive the capture's native resolution.
    fn set_capture_source(&mut self, _capture: CaptureInfo) {}
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn execute(&mut self) -> PreviewResult<StageResult> {
        (**self).execute()
    }

    fn frame_outputs(&self) -> &[&'static str] {
        (**self).frame_outputs()
    }

    fn frame(&self, name: &str) -> Option<&Frame> {
        (**self).frame(name)
    }

    fn set_runtime_configuration(&mut self, config: &RuntimeConfig) -> PreviewResult<()> {
        (**self).set_runtime_configuration(config)
    }

    fn set_capture_source(&mut self, capture: CaptureInfo) {
        (**self).set_capture_source(capture)
    }
}

/// Unqualified type name of `T`, without module path or generic arguments.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/stage.rs"]
mod tests;
