use crate::battlefield::*;
use crate::cell::Cell;
use crate::constants::*;

/// Binds one external unit to a slot on its orbit and turns the
/// formation's intent into concrete per-tick orders for that unit.
pub struct Agent {
    unit: UnitId,
    pub slot: usize,
    pub target_cell: Cell,
    attack_target: Option<UnitId>,
    // Capability cached when the target is assigned, not re-checked per
    // tick. Stale only until the next reassignment.
    can_attack_target: bool,
}

impl Agent {
    pub fn new(unit: UnitId) -> Agent {
        Agent {
            unit,
            slot: 0,
            target_cell: Cell::default(),
            attack_target: None,
            can_attack_target: false,
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    #[cfg(test)]
    pub fn attack_target(&self) -> Option<UnitId> {
        self.attack_target
    }

    /// Orders are only accepted by the engine inside an allow/disallow
    /// bracket. Rejection by the engine is not observable here; the leash
    /// in `on_tick` re-issues orders until the agent converges.
    pub fn give_point_order<W>(&self, world: &mut W, cell: Cell, kind: OrderKind, mode: OrderMode)
    where
        W: Battlefield,
    {
        world.allow_orders(self.unit);
        world.submit_point_order(self.unit, cell, kind, mode);
        world.disallow_orders(self.unit);
    }

    /// Attack the cell unless it is occupied by a unit of our own player,
    /// in which case move instead.
    pub fn smart_attack_order<W>(&self, world: &mut W, cell: Cell)
    where
        W: Battlefield,
    {
        let friendly = world
            .occupant_at(cell)
            .map(|occupant| world.unit_owner(occupant) == world.unit_owner(self.unit))
            .unwrap_or(false);

        if friendly {
            self.give_point_order(world, cell, OrderKind::MoveTo, OrderMode::Replace);
        } else {
            self.give_point_order(world, cell, OrderKind::Attack, OrderMode::Replace);
        }
    }

    /// Plain move back to the assigned formation slot.
    pub fn return_to_slot_order<W>(&self, world: &mut W)
    where
        W: Battlefield,
    {
        self.give_point_order(world, self.target_cell, OrderKind::MoveTo, OrderMode::Replace);
    }

    /// Stores the target and caches whether this unit's weapon can strike
    /// it, then immediately pushes the agent toward the target.
    pub fn assign_attack_target<W>(&mut self, world: &mut W, target: Option<UnitId>)
    where
        W: Battlefield,
    {
        self.attack_target = target;

        let target = match target {
            Some(target) => target,
            None => return,
        };

        self.can_attack_target = world.can_attack(self.unit, target);

        let target_cell = world.unit_cell(target);
        self.engage_order(world, target_cell);
    }

    // Attack-move variant used while engaging: a cell occupied by a unit
    // we are not at war with gets a move order, anything else an attack.
    fn engage_order<W>(&self, world: &mut W, cell: Cell)
    where
        W: Battlefield,
    {
        let order = match world.occupant_at(cell) {
            Some(occupant) => {
                if world.are_at_war(world.unit_owner(occupant), world.unit_owner(self.unit)) {
                    OrderKind::Attack
                } else {
                    OrderKind::MoveTo
                }
            }
            None => OrderKind::Attack,
        };

        self.give_point_order(world, cell, order, OrderMode::Replace);
    }

    pub fn on_tick<W>(&mut self, world: &mut W, tick: u32)
    where
        W: Battlefield,
    {
        if !world.needs_processing(self.unit, tick) {
            return;
        }
        // A building still going up cannot take movement orders.
        if world.is_under_construction(self.unit) {
            return;
        }

        let agent_cell = world.unit_cell(self.unit);
        let distance_to_slot = (agent_cell - self.target_cell).length_chebyshev();

        if let Some(target) = self.attack_target {
            if world.unit_owner(target) == world.unit_owner(self.unit) {
                // The target switched to our side, stop chasing it.
                self.attack_target = None;
            } else if self.can_attack_target {
                let target_cell = world.unit_cell(target);
                let distance_to_target = (agent_cell - target_cell).length_chebyshev();

                // Engage only while both the target and the formation slot
                // are close; otherwise fall through and regroup.
                if distance_to_target < ATTACK_ENGAGE_RANGE && distance_to_slot < ATTACK_HOLD_RANGE {
                    self.engage_order(world, target_cell);
                    return;
                }
            }
        }

        if distance_to_slot == 0 {
            return;
        }

        if distance_to_slot > LEASH_RANGE {
            // Drifted too far - drop the engagement and force a recall.
            self.attack_target = None;
            self.give_point_order(world, self.target_cell, OrderKind::MoveTo, OrderMode::Replace);
        } else if world.is_idle(self.unit) {
            self.engage_order(world, self.target_cell);
        }
    }
}
