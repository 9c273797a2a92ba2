use crate::{
    sync::snapshot::UnitSnapshot,
    types::{EntityId, PeerId},
    wire::{error::WireError, Wire, WireReader, WireWriter},
};

/// High-level command a unit is currently executing. Kinds outside the
/// replicated set decode to `Other` and are never acted on, so newer peers
/// can ship commands older peers simply ignore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Idle,
    Move { x: i32, y: i32 },
    Attack { target: EntityId },
    Guard,
    Other(u8),
}

const COMMAND_IDLE: u8 = 0;
const COMMAND_MOVE: u8 = 1;
const COMMAND_ATTACK: u8 = 2;
const COMMAND_GUARD: u8 = 3;

impl Command {
    /// Whether two commands agree in kind alone, payload ignored.
    pub fn same_kind(&self, other: &Command) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Wire for Command {
    fn ser(&self, writer: &mut WireWriter) {
        match self {
            Command::Idle => writer.write_u8(COMMAND_IDLE),
            Command::Move { x, y } => {
                writer.write_u8(COMMAND_MOVE);
                writer.write_i32(*x);
                writer.write_i32(*y);
            }
            Command::Attack { target } => {
                writer.write_u8(COMMAND_ATTACK);
                writer.write_u32(*target);
            }
            Command::Guard => writer.write_u8(COMMAND_GUARD),
            Command::Other(tag) => writer.write_u8(*tag),
        }
    }

    fn de(reader: &mut WireReader) -> Result<Self, WireError> {
        match reader.read_u8()? {
            COMMAND_IDLE => Ok(Command::Idle),
            COMMAND_MOVE => Ok(Command::Move {
                x: reader.read_i32()?,
                y: reader.read_i32()?,
            }),
            COMMAND_ATTACK => Ok(Command::Attack {
                target: reader.read_u32()?,
            }),
            COMMAND_GUARD => Ok(Command::Guard),
            tag => Ok(Command::Other(tag)),
        }
    }
}

/// Wrap a heading into `[0, 360)`.
pub fn normalize_heading(heading: f32) -> f32 {
    let wrapped = heading.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 when the input is a tiny negative
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// A mobile entity. The simulation owns its lifecycle; this crate only
/// reconciles the fields below.
#[derive(Debug, Clone)]
pub struct Unit {
    pub owner: PeerId,
    pub id: EntityId,
    /// Simulation position.
    pub pos_x: f32,
    pub pos_y: f32,
    pub pos_z: f32,
    /// Smoothed motion position; moves independently of `pos` between ticks.
    pub soft_x: f32,
    pub soft_y: f32,
    /// Always normalized into `[0, 360)`.
    pub heading: f32,
    pub health: u32,
    pub experience: f32,
    pub command: Command,
    pub secondary_order: u32,
    /// Lift-propulsion units never re-snap to terrain.
    pub airborne: bool,
    /// Last snapshot taken of this unit, retained as the reconciliation
    /// baseline for the next matching incoming check. Replaced wholesale.
    pub baseline: Option<UnitSnapshot>,
}

impl Unit {
    pub fn new(owner: PeerId, id: EntityId, x: f32, y: f32) -> Self {
        Self {
            owner,
            id,
            pos_x: x,
            pos_y: y,
            pos_z: 0.0,
            soft_x: x,
            soft_y: y,
            heading: 0.0,
            health: 100,
            experience: 0.0,
            command: Command::Idle,
            secondary_order: 0,
            airborne: false,
            baseline: None,
        }
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = normalize_heading(heading);
    }
}
