use leafline_stage::{SceneHooks, Stage};

use crate::{ClientConfig, GameWorld};

/// The context every handler runs against: the game-state owner and the
/// stage it is rendered on.
pub struct Client<W: GameWorld, H: SceneHooks> {
    pub world: W,
    pub stage: Stage<H>,
}

impl<W: GameWorld, H: SceneHooks> Client<W, H> {
    pub fn new(world: W, hooks: H, config: &ClientConfig) -> Self {
        Self {
            world,
            stage: Stage::new(hooks, &config.stage),
        }
    }
}
