//! The stage: render lock, fade, and queued scene loads.

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use crate::{SceneHooks, StageConfig};

/// A scene load waiting for the fade-out to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub map_id: i32,
    pub portal_id: u8,
    /// Set once the scene has been loaded.
    pub completed: bool,
}

/// Direction of the screen fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fade {
    #[default]
    Idle,
    /// Opacity falling toward 0. The pending load runs when it gets there.
    Out,
    /// Opacity rising back to 1 after a load.
    In,
}

/// What one call to [`Stage::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Frame number, starting at 1.
    pub index: u64,
    /// `false` while the render lock is held: nothing may be drawn.
    pub presented: bool,
    /// Screen opacity after this frame, 0.0 (black) to 1.0.
    pub opacity: f32,
    /// The transition completed during this frame, if any.
    pub completed: Option<PendingTransition>,
}

/// The active render/update context.
///
/// One per client. Decode handlers receive it explicitly and call
/// [`begin_transition`](Self::begin_transition); the frame loop calls
/// [`tick`](Self::tick).
///
/// ```text
///   Idle ──begin_transition──→ Out ──(opacity 0: load scene)──→ In ──(opacity 1)──→ Idle
///          lock, clear scene         unlock
/// ```
pub struct Stage<H: SceneHooks> {
    hooks: H,
    fade_step: f32,
    opacity: f32,
    fade: Fade,
    locked: bool,
    pending: VecDeque<PendingTransition>,
    frame: u64,
}

impl<H: SceneHooks> Stage<H> {
    pub fn new(hooks: H, config: &StageConfig) -> Self {
        let config = config.clone().validated();
        debug!(fade_step = config.fade_step, "stage created");
        Self {
            hooks,
            fade_step: config.fade_step,
            opacity: 1.0,
            fade: Fade::Idle,
            locked: false,
            pending: VecDeque::new(),
            frame: 0,
        }
    }

    /// Starts moving the player to `(map_id, portal_id)`.
    ///
    /// Synchronously takes the render lock, clears the current scene, and
    /// resets the clock, then schedules the fade-out. The scene itself
    /// loads on the frame the fade reaches black.
    ///
    /// Only one transition should be in flight. A second one is queued
    /// behind the first and logged, since the server should never send it.
    pub fn begin_transition(&mut self, map_id: i32, portal_id: u8) {
        if !self.pending.is_empty() {
            warn!(
                map_id,
                portal_id,
                queued = self.pending.len(),
                "transition requested while another is pending"
            );
        }

        self.hooks.lock();
        self.locked = true;
        self.hooks.clear_scene();
        self.hooks.reset_clock();

        self.pending.push_back(PendingTransition {
            map_id,
            portal_id,
            completed: false,
        });
        self.fade = Fade::Out;

        info!(map_id, portal_id, "scene transition started");
    }

    /// Advances the stage by one frame.
    pub fn tick(&mut self) -> Frame {
        self.frame += 1;
        let mut completed = None;

        match self.fade {
            Fade::Idle => {}
            Fade::Out => {
                self.opacity -= self.fade_step;
                if self.opacity <= 0.0 {
                    self.opacity = 0.0;
                    completed = self.complete_next();
                    if self.pending.is_empty() {
                        self.fade = Fade::In;
                    }
                }
            }
            Fade::In => {
                self.opacity += self.fade_step;
                if self.opacity >= 1.0 {
                    self.opacity = 1.0;
                    self.fade = Fade::Idle;
                }
            }
        }

        let frame = Frame {
            index: self.frame,
            presented: !self.locked,
            opacity: self.opacity,
            completed,
        };
        trace!(
            frame = frame.index,
            presented = frame.presented,
            opacity = frame.opacity,
            "stage tick"
        );
        frame
    }

    /// Runs the continuation at the front of the queue.
    fn complete_next(&mut self) -> Option<PendingTransition> {
        let mut next = self.pending.pop_front()?;

        self.hooks.clear_batches();
        self.hooks.load_scene(next.map_id, next.portal_id);
        self.hooks.enable_input();
        self.hooks.reset_clock();
        next.completed = true;

        // A queued transition already cleared the scene it is replacing;
        // keep the lock for it.
        if self.pending.is_empty() {
            self.hooks.unlock();
            self.locked = false;
        }

        info!(map_id = next.map_id, portal_id = next.portal_id, "scene loaded");
        Some(next)
    }

    /// Whether the render lock is held.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether a scene load is still waiting on the fade.
    pub fn is_transitioning(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Whether the stage has nothing left to do: no load pending, no fade.
    pub fn is_settled(&self) -> bool {
        self.pending.is_empty() && self.fade == Fade::Idle
    }

    pub fn fade(&self) -> Fade {
        self.fade
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }
}
