//! Stage and frame-pacing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do when a frame starts later than scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FramePolicy {
    /// Forget the missed frames and schedule the next one from now.
    #[default]
    Skip,
    /// Keep the original cadence. Late frames fire back to back until the
    /// schedule catches up.
    Drop,
}

/// Configuration for the stage and its frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Opacity change per frame during a fade. Default: 0.025 (40 frames).
    pub fade_step: f32,
    /// Frame rate in Hz. Default: 60.
    pub frame_rate_hz: u32,
    /// Overrun handling for [`FrameScheduler`](crate::FrameScheduler).
    pub policy: FramePolicy,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            fade_step: Self::DEFAULT_FADE_STEP,
            frame_rate_hz: 60,
            policy: FramePolicy::default(),
        }
    }
}

impl StageConfig {
    pub const DEFAULT_FADE_STEP: f32 = 0.025;
    /// Smallest fade step accepted (1000 frames per fade).
    pub const MIN_FADE_STEP: f32 = 0.001;
    pub const MAX_FRAME_RATE_HZ: u32 = 240;

    /// Clamp any out-of-range values so the config is safe to use.
    ///
    /// - `fade_step` clamped to `MIN_FADE_STEP..=1.0`; NaN falls back to the default.
    /// - `frame_rate_hz` clamped to `1..=MAX_FRAME_RATE_HZ`.
    pub fn validated(mut self) -> Self {
        if self.fade_step.is_nan() {
            warn!("fade_step is NaN, using default");
            self.fade_step = Self::DEFAULT_FADE_STEP;
        }
        let step = self.fade_step.clamp(Self::MIN_FADE_STEP, 1.0);
        if step != self.fade_step {
            warn!(requested = self.fade_step, used = step, "fade_step out of range, clamping");
            self.fade_step = step;
        }
        let rate = self.frame_rate_hz.clamp(1, Self::MAX_FRAME_RATE_HZ);
        if rate != self.frame_rate_hz {
            warn!(
                requested = self.frame_rate_hz,
                used = rate,
                "frame_rate_hz out of range, clamping"
            );
            self.frame_rate_hz = rate;
        }
        self
    }

    /// Duration of one frame at the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate_hz.max(1)))
    }
}
