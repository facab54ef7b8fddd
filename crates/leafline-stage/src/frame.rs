//! Fixed-rate frame pacing.
//!
//! [`FrameScheduler`] only decides *when* the next frame is due. It does
//! not tick the stage itself, so the caller can interleave frames with
//! packet handling on the same task:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(packet) = inbound.recv() => { dispatcher.dispatch_frame(&mut client, &packet)?; }
//!         _ = scheduler.wait_for_frame() => { client.stage.tick(); }
//!     }
//! }
//! ```

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

use crate::{FramePolicy, SceneHooks, Stage, StageConfig};

/// Information about a frame that just became due.
#[derive(Debug, Clone)]
pub struct FrameInfo {
    /// Monotonically increasing frame number (starts at 1).
    pub frame: u64,
    /// Fixed frame duration.
    pub dt: Duration,
    /// `true` if this frame fired noticeably late.
    pub overrun: bool,
    /// Frames skipped to catch up (always 0 under [`FramePolicy::Drop`]).
    pub frames_skipped: u64,
}

/// Paces the render/update loop at a fixed rate.
pub struct FrameScheduler {
    frame_duration: Duration,
    policy: FramePolicy,
    frame_count: u64,
    next_frame: Instant,
    paused: bool,
    total_overruns: u64,
}

impl FrameScheduler {
    pub fn new(config: &StageConfig) -> Self {
        let config = config.clone().validated();
        let frame_duration = config.frame_duration();
        debug!(
            rate_hz = config.frame_rate_hz,
            policy = ?config.policy,
            "frame scheduler created"
        );
        Self {
            frame_duration,
            policy: config.policy,
            frame_count: 0,
            next_frame: Instant::now() + frame_duration,
            paused: false,
            total_overruns: 0,
        }
    }

    /// Create a scheduler for a specific frame rate with default settings.
    pub fn with_rate(frame_rate_hz: u32) -> Self {
        Self::new(&StageConfig {
            frame_rate_hz,
            ..StageConfig::default()
        })
    }

    /// Waits until the next frame is due.
    ///
    /// While paused this future never resolves, so a `select!` loop keeps
    /// serving its other branches.
    pub async fn wait_for_frame(&mut self) -> FrameInfo {
        if self.paused {
            std::future::pending::<()>().await;
        }

        let due = self.next_frame;
        time::sleep_until(due).await;

        let now = Instant::now();
        self.frame_count += 1;

        let late_by = now.saturating_duration_since(due);
        let overrun = late_by > self.frame_duration / 10;
        let mut frames_skipped = 0;

        self.next_frame = match self.policy {
            FramePolicy::Skip => {
                if overrun {
                    frames_skipped =
                        (late_by.as_nanos() / self.frame_duration.as_nanos()) as u64;
                    if frames_skipped > 0 {
                        warn!(
                            frame = self.frame_count,
                            skipped = frames_skipped,
                            late_ms = late_by.as_secs_f64() * 1000.0,
                            "frame overrun, skipping ahead"
                        );
                    }
                }
                now + self.frame_duration
            }
            FramePolicy::Drop => {
                if overrun {
                    warn!(
                        frame = self.frame_count,
                        late_ms = late_by.as_secs_f64() * 1000.0,
                        "frame overrun, catching up"
                    );
                }
                due + self.frame_duration
            }
        };

        if overrun {
            self.total_overruns += 1;
        }
        trace!(frame = self.frame_count, overrun, "frame due");

        FrameInfo {
            frame: self.frame_count,
            dt: self.frame_duration,
            overrun,
            frames_skipped,
        }
    }

    /// Pause pacing. Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(frame = self.frame_count, "frame scheduler paused");
        }
    }

    /// Resume pacing. The next frame is due one frame from now, not at the
    /// stale deadline from before the pause.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.next_frame = Instant::now() + self.frame_duration;
            debug!(frame = self.frame_count, "frame scheduler resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    pub fn total_overruns(&self) -> u64 {
        self.total_overruns
    }
}

/// Ticks `stage` once per scheduled frame until it has no transition
/// pending and no fade running. Returns the number of frames ticked.
///
/// Returns immediately for a settled stage. Pends forever if the
/// scheduler is paused.
pub async fn settle<H: SceneHooks>(stage: &mut Stage<H>, scheduler: &mut FrameScheduler) -> u64 {
    let mut frames = 0;
    while !stage.is_settled() {
        scheduler.wait_for_frame().await;
        stage.tick();
        frames += 1;
    }
    frames
}
