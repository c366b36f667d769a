//! Stage-preview shows the intermediate frames of an image pipeline while it runs.
//!
//! A pipeline is a list of [`Stage`]s. Wrapping a stage in a [`ResultPreviewer`] makes every
//! frame output the stage declares appear on a [`DisplaySurface`] after each execution,
//! resized so the preview fits the host screen with the capture's aspect ratio intact.
//!
//! # Flow
//!
//! 1. **Configure**: [`PreviewOptions`] (target size, shrink factor, headless flag) are
//!    built once, usually with [`PreviewOptions::from_env`].
//! 2. **Inject**: the [`Pipeline`] hands each stage the [`RuntimeConfig`] (the `display`
//!    option toggles previews) and the capture resolution.
//! 3. **Execute**: the wrapped stage runs; its [`StageResult`] is returned unchanged.
//! 4. **Preview**: on the first preview the size and frame output list are computed and
//!    cached; every execution then shows each frame output titled `Stage.output`.
//!
//! Previews are skipped when `display` is `false` or no display server is attached.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capture;
mod config;
mod display;
mod foundation;
mod pipeline;
mod preview;
mod stages;

pub use capture::sequence::ImageSequence;
pub use config::options::{
    DEFAULT_SHRINK_FACTOR, DISPLAY_VAR, HEIGHT_VAR, PreviewOptions, WIDTH_VAR,
};
pub use config::runtime::{DISPLAY_KEY, RuntimeConfig, bool_option, parse_runtime_config};
pub use display::screen::{FixedScreen, NoScreen, ScreenProbe};
pub use display::surface::{DisplaySurface, PngDirSurface, RecordingSurface, ShownFrame};
pub use foundation::core::{CaptureInfo, CaptureSource, Frame, PreviewSize, ScreenSize};
pub use foundation::error::{PreviewError, PreviewResult};
pub use pipeline::runner::Pipeline;
pub use pipeline::stage::{Stage, StageResult, short_type_name};
pub use preview::previewer::ResultPreviewer;
pub use preview::sizing::compute_preview_size;
pub use stages::preprocess::Preprocess;
