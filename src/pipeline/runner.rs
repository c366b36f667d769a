use crate::{
    config::runtime::RuntimeConfig,
    foundation::{
        core::{CaptureInfo, CaptureSource},
        error::{PreviewError, PreviewResult},
    },
    pipeline::stage::{Stage, StageResult},
};

/// Ordered list of stages sharing one runtime configuration and capture.
pub struct Pipeline {
    config: RuntimeConfig,
    capture: Option<CaptureInfo>,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Empty pipeline that hands `config` to every stage pushed into it.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            capture: None,
            stages: Vec::new(),
        }
    }

    /// Append a stage. It receives the runtime configuration, and the capture if one is set.
    pub fn push(&mut self, mut stage: impl Stage + 'static) -> PreviewResult<&mut Self> {
        stage.set_runtime_configuration(&self.config)?;
        if let Some(capture) = self.capture {
            stage.set_capture_source(capture);
        }
        self.stages.push(Box::new(stage));
        Ok(self)
    }

    /// Record the capture and hand its resolution to every stage, current and future.
    pub fn set_capture_source(&mut self, capture: &dyn CaptureSource) {
        let info = CaptureInfo::of(capture);
        self.capture = Some(info);
        for stage in &mut self.stages {
            stage.set_capture_source(info);
        }
    }

    /// Names of the stages in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` when no stage has been pushed.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage once, in order, stopping at the first [`StageResult::Halt`].
    #[tracing::instrument(skip(self), fields(stages = self.stages.len()))]
    pub fn run_once(&mut self) -> PreviewResult<StageResult> {
        for stage in &mut self.stages {
            if !stage.execute()?.should_continue() {
                tracing::debug!(stage = stage.name(), "stage halted pipeline");
                return Ok(StageResult::Halt);
            }
        }
        Ok(StageResult::Continue)
    }

    /// Repeat [`Pipeline::run_once`] until a stage halts.
    ///
    /// Returns the number of passes run, including the one that halted. An empty pipeline
    /// never halts and is rejected.
    pub fn run(&mut self) -> PreviewResult<u64> {
        if self.stages.is_empty() {
            return Err(PreviewError::stage("pipeline has no stages"));
        }
        let mut passes = 0u64;
        loop {
            passes += 1;
            if !self.run_once()?.should_continue() {
                break;
            }
        }
        tracing::info!(passes, "pipeline finished");
        Ok(passes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
