//! The capabilities a stage needs from the renderer and the game loop.

/// Hooks into the render, scene, and input collaborators.
///
/// The stage calls these in a fixed order during a transition and never
/// inspects the results. Implementations decide what "clearing a scene" or
/// "locking the renderer" means for them.
pub trait SceneHooks {
    /// Stop presenting frames until [`unlock`](Self::unlock).
    fn lock(&mut self);

    fn unlock(&mut self);

    /// Drop the active scene (map, characters, effects).
    fn clear_scene(&mut self);

    /// Drop any render batches queued against the old scene.
    fn clear_batches(&mut self);

    /// Load a map and place the player at the portal.
    fn load_scene(&mut self, map_id: i32, portal_id: u8);

    /// Restart the elapsed-time clock so the update loop does not see the
    /// load time as one huge frame.
    fn reset_clock(&mut self);

    /// Re-enable input and UI after a scene load.
    fn enable_input(&mut self);
}

/// Hooks for running without a renderer: bots, replays, tests.
///
/// Tracks only what a headless client can observe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessScene {
    /// The loaded map and portal, if any.
    pub current: Option<(i32, u8)>,
    pub locked: bool,
    pub input_enabled: bool,
    /// Number of scene loads so far.
    pub loads: u64,
}

impl SceneHooks for HeadlessScene {
    fn lock(&mut self) {
        self.locked = true;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn clear_scene(&mut self) {
        self.current = None;
    }

    fn clear_batches(&mut self) {}

    fn load_scene(&mut self, map_id: i32, portal_id: u8) {
        self.current = Some((map_id, portal_id));
        self.loads += 1;
    }

    fn reset_clock(&mut self) {}

    fn enable_input(&mut self) {
        self.input_enabled = true;
    }
}
