//! Scene transitions for Leafline.
//!
//! Changing maps means tearing down one scene and loading another, which
//! can take a while. This crate makes sure the player never sees the
//! half-built result:
//!
//! 1. [`Stage::begin_transition`] takes the render lock, clears the scene,
//!    and starts a fade-out.
//! 2. Each [`Stage::tick`] advances the fade by one step. While the lock
//!    is held, frames are not presented.
//! 3. When the screen is fully dark the queued [`PendingTransition`] runs:
//!    the new scene loads and the lock is released. The fade then reverses.
//!
//! Everything runs on the thread that calls `tick`. The continuation is a
//! plain value polled once per frame, not a closure on another thread.
//!
//! [`FrameScheduler`] paces `tick` calls at a fixed frame rate:
//!
//! ```ignore
//! loop {
//!     scheduler.wait_for_frame().await;
//!     let frame = stage.tick();
//!     if frame.presented { /* draw */ }
//! }
//! ```

mod config;
mod frame;
mod hooks;
mod stage;

pub use config::{FramePolicy, StageConfig};
pub use frame::{FrameInfo, FrameScheduler, settle};
pub use hooks::{HeadlessScene, SceneHooks};
pub use stage::{Fade, Frame, PendingTransition, Stage};
