use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// Stable identity of an externally owned unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Identity of the player owning a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    MoveTo,
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderMode {
    Replace,
    Queue,
}

/// Seam to the embedding simulation. The formation only ever reads unit
/// state or submits fire-and-forget orders through this trait; it never
/// owns unit lifetime. The simulation may kill or reposition units at any
/// point between ticks - stale state is detected by re-querying, not
/// guarded against.
pub trait Battlefield {
    fn unit_cell(&self, unit: UnitId) -> Cell;

    fn unit_owner(&self, unit: UnitId) -> PlayerId;

    fn is_dead(&self, unit: UnitId) -> bool;

    /// Whether the unit has no queued orders.
    fn is_idle(&self, unit: UnitId) -> bool;

    /// Buildings accept no movement orders while under construction.
    fn is_under_construction(&self, unit: UnitId) -> bool;

    /// External per-unit scheduling gate. A unit that does not need
    /// processing this tick is skipped entirely.
    fn needs_processing(&self, unit: UnitId, tick: u32) -> bool;

    /// Topmost unit currently standing on the cell, if any.
    fn occupant_at(&self, cell: Cell) -> Option<UnitId>;

    fn are_at_war(&self, a: PlayerId, b: PlayerId) -> bool;

    /// Whether the attacker's weapon can legally strike the target.
    /// Queried once at assignment time and cached by the agent.
    fn can_attack(&self, attacker: UnitId, target: UnitId) -> bool;

    fn allow_orders(&mut self, unit: UnitId);

    fn submit_point_order(&mut self, unit: UnitId, cell: Cell, kind: OrderKind, mode: OrderMode);

    fn disallow_orders(&mut self, unit: UnitId);
}
