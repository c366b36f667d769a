use crate::foundation::{
    core::ScreenSize,
    error::{PreviewError, PreviewResult},
};

/// Environment variable overriding the preview target width.
pub const WIDTH_VAR: &str = "WIDTH";
/// Environment variable overriding the preview target height.
pub const HEIGHT_VAR: &str = "HEIGHT";
/// Display-server marker; absent or empty means headless.
pub const DISPLAY_VAR: &str = "DISPLAY";

/// Fraction of the fitted size actually used for the preview surface.
pub const DEFAULT_SHRINK_FACTOR: f64 = 0.85;

/// Construction-time options for [`ResultPreviewer`](crate::ResultPreviewer).
///
/// Build these with [`PreviewOptions::from_env`] in binaries, or by hand in tests and
/// embedders that already know their screen.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Explicit target size. When unset, the screen probe is queried.
    pub target: Option<ScreenSize>,
    /// Multiplier applied to both fitted dimensions, in `(0, 1]`.
    pub shrink_factor: f64,
    /// No display server is attached; previews are skipped entirely.
    pub headless: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            target: None,
            shrink_factor: DEFAULT_SHRINK_FACTOR,
            headless: false,
        }
    }
}

impl PreviewOptions {
    /// Read `WIDTH`, `HEIGHT` and `DISPLAY` from the process environment.
    pub fn from_env() -> PreviewResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`PreviewOptions::from_env`], reading through `lookup`.
    ///
    /// `WIDTH` and `HEIGHT` must be given together; one without the other is rejected.
    pub fn from_lookup<F>(lookup: F) -> PreviewResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let target = match (non_empty(WIDTH_VAR), non_empty(HEIGHT_VAR)) {
            (Some(w), Some(h)) => Some(ScreenSize::new(
                parse_dimension(WIDTH_VAR, &w)?,
                parse_dimension(HEIGHT_VAR, &h)?,
            )?),
            (None, None) => None,
            (Some(_), None) => {
                return Err(PreviewError::config(format!(
                    "{WIDTH_VAR} is set but {HEIGHT_VAR} is not; set both or neither"
                )));
            }
            (None, Some(_)) => {
                return Err(PreviewError::config(format!(
                    "{HEIGHT_VAR} is set but {WIDTH_VAR} is not; set both or neither"
                )));
            }
        };

        let headless = non_empty(DISPLAY_VAR).is_none();

        let opts = Self {
            target,
            headless,
            ..Self::default()
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Check invariants that serde or hand construction could violate.
    pub fn validate(&self) -> PreviewResult<()> {
        if !self.shrink_factor.is_finite() || self.shrink_factor <= 0.0 || self.shrink_factor > 1.0
        {
            return Err(PreviewError::config(format!(
                "shrink_factor must be in (0, 1], got {}",
                self.shrink_factor
            )));
        }
        if let Some(t) = self.target
            && (t.width == 0 || t.height == 0)
        {
            return Err(PreviewError::config("target size must be non-zero"));
        }
        Ok(())
    }
}

fn parse_dimension(key: &str, raw: &str) -> PreviewResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| PreviewError::config(format!("{key}='{raw}' is not a valid dimension: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
