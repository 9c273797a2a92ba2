use crate::{
    types::PeerId,
    wire::{error::WireError, Wire, WireReader, WireWriter},
};

/// Where an outgoing payload is headed. The transport guarantees in-order
/// (but not reliable) delivery per logical channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// The in-order game queue every peer drains.
    Game,
    /// Best-effort broadcast outside the game queue.
    Broadcast,
    /// Directly to one peer (pong replies).
    Peer(PeerId),
}

/// Leading discriminant byte of every sync payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    UnitCheck,
    StructureCheck,
    ResourceCheck,
    Ping,
}

impl Wire for MessageKind {
    fn ser(&self, writer: &mut WireWriter) {
        let index: u8 = match self {
            MessageKind::UnitCheck => 0,
            MessageKind::StructureCheck => 1,
            MessageKind::ResourceCheck => 2,
            MessageKind::Ping => 3,
        };
        writer.write_u8(index);
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireError> {
        match reader.read_u8()? {
            0 => Ok(MessageKind::UnitCheck),
            1 => Ok(MessageKind::StructureCheck),
            2 => Ok(MessageKind::ResourceCheck),
            3 => Ok(MessageKind::Ping),
            kind => Err(WireError::InvalidMessageKind { kind }),
        }
    }
}

/// Outbound side of the transport layer. Sends are fire-and-forget: the
/// payload is enqueued for transmission and the call returns within the tick.
pub trait Transport {
    fn send(&mut self, to: Recipient, payload: Vec<u8>);

    /// Bytes enqueued during the transport's recent measurement window;
    /// the rolling counter the bandwidth monitor gates on.
    fn recent_bytes_sent(&self) -> usize;
}
