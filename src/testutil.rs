use crate::battlefield::*;
use crate::cell::Cell;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderEvent {
    Allowed(UnitId),
    Submitted(UnitId, Cell, OrderKind, OrderMode),
    Disallowed(UnitId),
}

#[derive(Clone, Copy, Debug)]
pub struct MockUnit {
    pub cell: Cell,
    pub owner: PlayerId,
    pub dead: bool,
    pub idle: bool,
    pub under_construction: bool,
    pub can_attack: bool,
}

/// Scriptable battlefield that records every order issued through it,
/// including the allow/disallow bracketing.
#[derive(Default)]
pub struct MockBattlefield {
    pub units: BTreeMap<UnitId, MockUnit>,
    pub wars: Vec<(PlayerId, PlayerId)>,
    pub events: Vec<OrderEvent>,
}

impl MockBattlefield {
    pub fn new() -> MockBattlefield {
        MockBattlefield::default()
    }

    pub fn spawn(&mut self, id: u32, cell: Cell, owner: PlayerId) -> UnitId {
        let unit = UnitId(id);
        self.units.insert(
            unit,
            MockUnit {
                cell,
                owner,
                dead: false,
                idle: true,
                under_construction: false,
                can_attack: true,
            },
        );
        unit
    }

    pub fn declare_war(&mut self, a: PlayerId, b: PlayerId) {
        self.wars.push((a, b));
    }

    pub fn unit_mut(&mut self, unit: UnitId) -> &mut MockUnit {
        self.units.get_mut(&unit).unwrap()
    }

    pub fn submitted_orders(&self) -> Vec<(UnitId, Cell, OrderKind, OrderMode)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                OrderEvent::Submitted(unit, cell, kind, mode) => Some((unit, cell, kind, mode)),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Battlefield for MockBattlefield {
    fn unit_cell(&self, unit: UnitId) -> Cell {
        self.units[&unit].cell
    }

    fn unit_owner(&self, unit: UnitId) -> PlayerId {
        self.units[&unit].owner
    }

    fn is_dead(&self, unit: UnitId) -> bool {
        self.units[&unit].dead
    }

    fn is_idle(&self, unit: UnitId) -> bool {
        self.units[&unit].idle
    }

    fn is_under_construction(&self, unit: UnitId) -> bool {
        self.units[&unit].under_construction
    }

    fn needs_processing(&self, _unit: UnitId, _tick: u32) -> bool {
        true
    }

    fn occupant_at(&self, cell: Cell) -> Option<UnitId> {
        self.units
            .iter()
            .find(|(_, unit)| !unit.dead && unit.cell == cell)
            .map(|(unit, _)| *unit)
    }

    fn are_at_war(&self, a: PlayerId, b: PlayerId) -> bool {
        self.wars.contains(&(a, b)) || self.wars.contains(&(b, a))
    }

    fn can_attack(&self, attacker: UnitId, _target: UnitId) -> bool {
        self.units[&attacker].can_attack
    }

    fn allow_orders(&mut self, unit: UnitId) {
        self.events.push(OrderEvent::Allowed(unit));
    }

    fn submit_point_order(&mut self, unit: UnitId, cell: Cell, kind: OrderKind, mode: OrderMode) {
        self.events.push(OrderEvent::Submitted(unit, cell, kind, mode));
    }

    fn disallow_orders(&mut self, unit: UnitId) {
        self.events.push(OrderEvent::Disallowed(unit));
    }
}
