#![allow(dead_code)]

use std::collections::HashMap;

use driftsync::{
    BuildStatus, Command, EntityId, GameTime, MessageKind, OutboundMute, PeerId, Recipient,
    ScoreRecord, Session, Structure, TilePos, Transport, TypeRef, Unit, UnitSnapshot, Wire,
    WireWriter, World,
};

/// Transport double: records every send and exposes a settable recent-bytes
/// counter for bandwidth gating tests.
pub struct TestTransport {
    pub sent: Vec<(Recipient, Vec<u8>)>,
    pub recent_bytes: usize,
}

impl TestTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            recent_bytes: 0,
        }
    }

    /// Payloads of every recorded send with the given leading kind byte.
    pub fn payloads_of_kind(&self, kind: u8) -> Vec<Vec<u8>> {
        self.sent
            .iter()
            .filter(|(_, payload)| payload.first() == Some(&kind))
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

impl Transport for TestTransport {
    fn send(&mut self, to: Recipient, payload: Vec<u8>) {
        self.recent_bytes += payload.len();
        self.sent.push((to, payload));
    }

    fn recent_bytes_sent(&self) -> usize {
        self.recent_bytes
    }
}

/// Session double with membership and authority configured per test.
pub struct TestSession {
    pub local: PeerId,
    pub host: bool,
    pub lobby: bool,
    pub humans: Vec<PeerId>,
    pub responsible: Vec<PeerId>,
    pub joining: Vec<PeerId>,
    pub scores: HashMap<PeerId, ScoreRecord>,
    pub broadcasts: Vec<(PeerId, ScoreRecord)>,
    pub published_averages: Vec<u32>,
}

impl TestSession {
    pub fn new(local: PeerId) -> Self {
        Self {
            local,
            host: false,
            lobby: false,
            humans: vec![local],
            responsible: vec![local],
            joining: Vec::new(),
            scores: HashMap::new(),
            broadcasts: Vec::new(),
            published_averages: Vec::new(),
        }
    }
}

impl Session for TestSession {
    fn local_peer(&self) -> PeerId {
        self.local
    }

    fn is_host(&self) -> bool {
        self.host
    }

    fn is_human(&self, peer: PeerId) -> bool {
        self.humans.contains(&peer)
    }

    fn is_responsible(&self, owner: PeerId) -> bool {
        self.responsible.contains(&owner)
    }

    fn join_in_progress(&self, peer: PeerId) -> bool {
        self.joining.contains(&peer)
    }

    fn in_lobby(&self) -> bool {
        self.lobby
    }

    fn score(&self, owner: PeerId) -> ScoreRecord {
        self.scores.get(&owner).copied().unwrap_or_default()
    }

    fn broadcast_score(&mut self, owner: PeerId, record: ScoreRecord) {
        self.scores.insert(owner, record);
        self.broadcasts.push((owner, record));
    }

    fn publish_average_ping(&mut self, millis: u32) {
        self.published_averages.push(millis);
    }
}

/// World double: vector-backed entity storage plus call recording for the
/// simulation actions the protocol is allowed to trigger.
pub struct TestWorld {
    pub units: Vec<Unit>,
    pub structures: Vec<Structure>,
    pub resources: HashMap<PeerId, u32>,
    pub known_types: Vec<TypeRef>,
    pub capacity_types: Vec<TypeRef>,
    pub rebuild_pairs: Vec<(TypeRef, TypeRef)>,
    pub terrain: f32,
    pub next_id: EntityId,
    pub issued: Vec<(PeerId, EntityId, Command)>,
    pub stopped: Vec<(PeerId, EntityId)>,
    pub upgrade_calls: Vec<(PeerId, EntityId)>,
    pub resource_writes: Vec<(PeerId, u32)>,
    /// When set, every command call records whether outbound suppression was
    /// engaged at that moment.
    pub mute: Option<OutboundMute>,
    pub commands_while_muted: Vec<bool>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            structures: Vec::new(),
            resources: HashMap::new(),
            known_types: Vec::new(),
            capacity_types: Vec::new(),
            rebuild_pairs: Vec::new(),
            terrain: 0.0,
            next_id: 1000,
            issued: Vec::new(),
            stopped: Vec::new(),
            upgrade_calls: Vec::new(),
            resource_writes: Vec::new(),
            mute: None,
            commands_while_muted: Vec::new(),
        }
    }

    pub fn add_unit(&mut self, owner: PeerId, id: EntityId, x: f32, y: f32) {
        self.units.push(Unit::new(owner, id, x, y));
    }

    pub fn add_built_structure(
        &mut self,
        owner: PeerId,
        id: EntityId,
        type_ref: TypeRef,
        x: u16,
        y: u16,
    ) {
        let mut structure = Structure::new(owner, id, type_ref, TilePos { x, y, z: 0 });
        structure.status = BuildStatus::Built;
        if self.capacity_types.contains(&type_ref) {
            structure.capacity = Some(0);
        }
        self.structures.push(structure);
        if !self.known_types.contains(&type_ref) {
            self.known_types.push(type_ref);
        }
    }

    fn note_command_mute(&mut self) {
        if let Some(mute) = &self.mute {
            self.commands_while_muted.push(mute.engaged());
        }
    }
}

impl World for TestWorld {
    fn unit(&self, owner: PeerId, id: EntityId) -> Option<&Unit> {
        self.units.iter().find(|u| u.owner == owner && u.id == id)
    }

    fn unit_mut(&mut self, owner: PeerId, id: EntityId) -> Option<&mut Unit> {
        self.units
            .iter_mut()
            .find(|u| u.owner == owner && u.id == id)
    }

    fn unit_ids(&self, owner: PeerId) -> Vec<EntityId> {
        self.units
            .iter()
            .filter(|u| u.owner == owner)
            .map(|u| u.id)
            .collect()
    }

    fn issue_command(&mut self, owner: PeerId, id: EntityId, command: Command) {
        self.note_command_mute();
        self.issued.push((owner, id, command));
        if let Some(unit) = self.unit_mut(owner, id) {
            unit.command = command;
        }
    }

    fn stop_unit(&mut self, owner: PeerId, id: EntityId) {
        self.note_command_mute();
        self.stopped.push((owner, id));
        if let Some(unit) = self.unit_mut(owner, id) {
            unit.command = Command::Idle;
        }
    }

    fn structure(&self, owner: PeerId, id: EntityId) -> Option<&Structure> {
        self.structures
            .iter()
            .find(|s| s.owner == owner && s.id == id)
    }

    fn structure_mut(&mut self, owner: PeerId, id: EntityId) -> Option<&mut Structure> {
        self.structures
            .iter_mut()
            .find(|s| s.owner == owner && s.id == id)
    }

    fn structure_ids(&self, owner: PeerId) -> Vec<EntityId> {
        self.structures
            .iter()
            .filter(|s| s.owner == owner)
            .map(|s| s.id)
            .collect()
    }

    fn structure_at(&self, x: u16, y: u16) -> Option<(PeerId, EntityId)> {
        self.structures
            .iter()
            .find(|s| s.pos.x == x && s.pos.y == y)
            .map(|s| (s.owner, s.id))
    }

    fn structure_type_exists(&self, type_ref: TypeRef) -> bool {
        self.known_types.contains(&type_ref)
    }

    fn type_has_capacity(&self, type_ref: TypeRef) -> bool {
        self.capacity_types.contains(&type_ref)
    }

    fn compatible_upgrade(&self, occupying: TypeRef, incoming: TypeRef) -> bool {
        self.rebuild_pairs.contains(&(occupying, incoming))
    }

    fn build_structure(
        &mut self,
        owner: PeerId,
        type_ref: TypeRef,
        pos: TilePos,
        heading: f32,
    ) -> Option<EntityId> {
        if !self.known_types.contains(&type_ref) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        let mut structure = Structure::new(owner, id, type_ref, pos);
        structure.heading = heading;
        if self.capacity_types.contains(&type_ref) {
            structure.capacity = Some(0);
        }
        self.structures.push(structure);
        Some(id)
    }

    fn demolish_structure(&mut self, owner: PeerId, id: EntityId) {
        self.structures.retain(|s| !(s.owner == owner && s.id == id));
    }

    fn upgrade_structure(&mut self, owner: PeerId, id: EntityId) {
        self.upgrade_calls.push((owner, id));
        if let Some(structure) = self.structure_mut(owner, id) {
            structure.capacity = Some(structure.capacity.unwrap_or(0) + 1);
        }
    }

    fn reassign_structure_id(&mut self, owner: PeerId, id: EntityId, new_id: EntityId) {
        if let Some(structure) = self.structure_mut(owner, id) {
            structure.id = new_id;
        }
    }

    fn terrain_height(&self, _x: f32, _y: f32) -> f32 {
        self.terrain
    }

    fn resource(&self, owner: PeerId) -> u32 {
        self.resources.get(&owner).copied().unwrap_or(0)
    }

    fn set_resource(&mut self, owner: PeerId, amount: u32) {
        self.resource_writes.push((owner, amount));
        self.resources.insert(owner, amount);
    }
}

pub fn unit_check_payload(ref_time: GameTime, entries: &[UnitSnapshot]) -> Vec<u8> {
    let mut writer = WireWriter::new();
    MessageKind::UnitCheck.ser(&mut writer);
    writer.write_u8(entries.len() as u8);
    writer.write_u32(ref_time);
    for entry in entries {
        entry.ser(&mut writer);
    }
    writer.to_bytes()
}

pub struct StructureCheck {
    pub owner: PeerId,
    pub id: EntityId,
    pub health: u32,
    pub type_ref: TypeRef,
    pub x: u16,
    pub y: u16,
    pub z: u16,
    pub heading: f32,
    pub capacity: Option<u8>,
}

pub fn structure_check_payload(check: &StructureCheck) -> Vec<u8> {
    let mut writer = WireWriter::new();
    MessageKind::StructureCheck.ser(&mut writer);
    writer.write_u8(check.owner);
    writer.write_u32(check.id);
    writer.write_u32(check.health);
    writer.write_u32(check.type_ref);
    writer.write_u16(check.x);
    writer.write_u16(check.y);
    writer.write_u16(check.z);
    writer.write_f32(check.heading);
    if let Some(capacity) = check.capacity {
        writer.write_u8(capacity);
    }
    writer.to_bytes()
}

pub fn resource_check_payload(owner: PeerId, amount: u32) -> Vec<u8> {
    let mut writer = WireWriter::new();
    MessageKind::ResourceCheck.ser(&mut writer);
    writer.write_u8(owner);
    writer.write_u32(amount);
    writer.to_bytes()
}

pub fn ping_payload(sender: PeerId, is_new: bool) -> Vec<u8> {
    let mut writer = WireWriter::new();
    MessageKind::Ping.ser(&mut writer);
    writer.write_u8(sender);
    writer.write_bool(is_new);
    writer.to_bytes()
}
