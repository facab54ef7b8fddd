//! Opcode routing for inbound messages.
//!
//! Handlers are registered once at startup. After that the dispatcher is
//! read-only and keeps no per-message state.

use std::collections::HashMap;

use leafline_stage::SceneHooks;
use leafline_wire::{InPacket, RecvOpcode};
use tracing::debug;

use crate::{Client, GameWorld, LeaflineError, SetFieldHandler};

/// Decodes one message body and applies it to the context.
///
/// `packet` is positioned just after the opcode.
pub trait PacketHandler<Ctx>: Send + Sync {
    fn handle(&self, ctx: &mut Ctx, packet: &mut InPacket<'_>) -> Result<(), LeaflineError>;
}

/// What [`Dispatcher::dispatch`] did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Handled,
    /// No handler is registered for the opcode.
    Ignored,
}

/// Routes messages to the handler registered for their opcode.
pub struct Dispatcher<Ctx> {
    handlers: HashMap<u16, Box<dyn PacketHandler<Ctx>>>,
}

impl<Ctx> Default for Dispatcher<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> Dispatcher<Ctx> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for `opcode`, replacing any previous one.
    pub fn register(&mut self, opcode: u16, handler: impl PacketHandler<Ctx> + 'static) {
        if self.handlers.insert(opcode, Box::new(handler)).is_some() {
            debug!(opcode, "replaced packet handler");
        }
    }

    pub fn handles(&self, opcode: u16) -> bool {
        self.handlers.contains_key(&opcode)
    }

    /// Hands `body` to the handler for `opcode`.
    ///
    /// Unknown opcodes are logged and ignored. Handler errors are returned
    /// unchanged.
    pub fn dispatch(
        &self,
        ctx: &mut Ctx,
        opcode: u16,
        body: &[u8],
    ) -> Result<Dispatched, LeaflineError> {
        let Some(handler) = self.handlers.get(&opcode) else {
            debug!(opcode, len = body.len(), "no handler for opcode, ignoring");
            return Ok(Dispatched::Ignored);
        };

        debug!(opcode, len = body.len(), "dispatching");
        let mut packet = InPacket::new(body);
        handler.handle(ctx, &mut packet)?;
        Ok(Dispatched::Handled)
    }

    /// Like [`dispatch`](Self::dispatch), for a frame that still starts
    /// with its `u16` opcode.
    pub fn dispatch_frame(
        &self,
        ctx: &mut Ctx,
        frame: &[u8],
    ) -> Result<Dispatched, LeaflineError> {
        let mut header = InPacket::new(frame);
        let opcode = header.read_u16()?;
        self.dispatch(ctx, opcode, &frame[header.position()..])
    }
}

impl<W: GameWorld, H: SceneHooks> Dispatcher<Client<W, H>> {
    /// A dispatcher with every client handler registered.
    pub fn with_client_handlers() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(RecvOpcode::SetField.code(), SetFieldHandler);
        dispatcher
    }
}
