//! # Leafline
//!
//! The binary protocol layer of a real-time multiplayer game client.
//!
//! Framed server messages come in, a [`Dispatcher`] routes them by opcode,
//! and handlers decode them into structured records for the game-state
//! owner. The field-entry handler ([`SetFieldHandler`]) also drives the
//! scene transition that moves the player to the new map.
//!
//! ```text
//! transport bytes → Dispatcher → SetFieldHandler → leafline-player decoders
//!                                      │                   │
//!                                      ▼                   ▼
//!                              Stage (fade, load)     GameWorld (state owner)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use leafline::prelude::*;
//!
//! let config = ClientConfig::from_json(&std::fs::read_to_string("client.json")?)?;
//! let mut client = Client::new(my_world, my_render_hooks, &config);
//! let dispatcher = Dispatcher::with_client_handlers();
//!
//! // for every framed message from the connection:
//! dispatcher.dispatch_frame(&mut client, &frame)?;
//! // every frame:
//! client.stage.tick();
//! ```

mod client;
mod config;
mod dispatch;
mod error;
mod setfield;
mod world;

pub use client::Client;
pub use config::ClientConfig;
pub use dispatch::{Dispatched, Dispatcher, PacketHandler};
pub use error::LeaflineError;
pub use setfield::{FieldEntry, SetFieldHandler};
pub use world::{CharacterEntry, GameWorld};

pub use leafline_player as player;
pub use leafline_stage as stage;
pub use leafline_wire as wire;

/// Everything needed to wire up a client.
pub mod prelude {
    pub use crate::{
        CharacterEntry, Client, ClientConfig, Dispatched, Dispatcher, FieldEntry, GameWorld,
        LeaflineError, PacketHandler, SetFieldHandler,
    };
    pub use leafline_player::{
        CharacterId, Cooldown, Inventory, InventoryType, Item, ItemCodec, SessionState,
        SpawnPoint,
    };
    pub use leafline_stage::{
        FrameScheduler, HeadlessScene, SceneHooks, Stage, StageConfig, settle,
    };
    pub use leafline_wire::{InPacket, OutPacket, RecvOpcode, SendOpcode, WireError};
}
