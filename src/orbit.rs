use crate::agent::Agent;
use crate::battlefield::*;
use crate::cell::Cell;
use crate::constants::*;
use itertools::Itertools;
use log::*;

/// One square ring of slots around the formation center. Owns the agents
/// assigned to it, keeps them in angular order and propagates shared state
/// (center, attack target) down to them.
pub struct Orbit {
    pub agents: Vec<Agent>,
    pub radius: u32,
    /// Perimeter cell offsets relative to the center, walked clockwise
    /// from the top-left corner.
    cells: Vec<Cell>,
    pub slot_count: usize,
    pub max_agents: usize,
    center: Cell,
    prev_center: Cell,
    attack_target: Option<UnitId>,
    /// Tick offset in [0, ORBIT_PROCESSING_PERIOD) for the staggered
    /// bookkeeping pass. Assigned by the owning formation at creation.
    update_tact: u32,
}

fn perimeter_cells(radius: u32) -> Vec<Cell> {
    let r = radius as i32;
    let side = 2 * r;

    let mut cells = Vec::with_capacity(4 * side as usize);
    for i in 0..side {
        cells.push(Cell::new(-r + i, -r));
    }
    for i in 0..side {
        cells.push(Cell::new(r, -r + i));
    }
    for i in 0..side {
        cells.push(Cell::new(r - i, r));
    }
    for i in 0..side {
        cells.push(Cell::new(-r, r - i));
    }
    cells
}

impl Orbit {
    pub fn new(center: Cell, radius: u32, density: f64, update_tact: u32) -> Orbit {
        let cells = perimeter_cells(radius);
        let slot_count = cells.len();
        let max_agents = (slot_count as f64 * density).floor() as usize;

        Orbit {
            agents: Vec::new(),
            radius,
            cells,
            slot_count,
            max_agents,
            center,
            prev_center: center,
            attack_target: None,
            update_tact,
        }
    }

    pub fn slot_cell(&self, slot: usize) -> Cell {
        self.cells[slot]
    }

    /// Moves the whole orbit. No-op when the center did not actually
    /// change, so callers may feed it the hero position every tick without
    /// causing order churn.
    pub fn set_center(&mut self, center: Cell) {
        self.center = center;

        if self.center != self.prev_center {
            for agent in &mut self.agents {
                agent.target_cell = self.center + self.cells[agent.slot];
            }
            self.prev_center = self.center;
        }
    }

    pub fn set_attack_target<W>(&mut self, world: &mut W, target: Option<UnitId>)
    where
        W: Battlefield,
    {
        self.attack_target = target;
        for agent in &mut self.agents {
            agent.assign_attack_target(world, target);
        }
    }

    /// Smart-attacks the orbit's footprint translated to `cell`: every
    /// agent strikes the perimeter cell matching its own slot.
    pub fn smart_attack_command<W>(&mut self, world: &mut W, cell: Cell)
    where
        W: Battlefield,
    {
        self.set_attack_target(world, None);
        for agent in &self.agents {
            agent.smart_attack_order(world, cell + self.cells[agent.slot]);
        }
    }

    pub fn return_to_slots_command<W>(&mut self, world: &mut W)
    where
        W: Battlefield,
    {
        self.set_attack_target(world, None);
        for agent in &self.agents {
            agent.return_to_slot_order(world);
        }
    }

    pub fn add_agents<W>(&mut self, world: &W, agents: Vec<Agent>)
    where
        W: Battlefield,
    {
        if agents.is_empty() {
            return;
        }

        if self.agents.len() + agents.len() > self.max_agents {
            warn!(
                "orbit radius {} overfilled: {} agents for {} usable slots",
                self.radius,
                self.agents.len() + agents.len(),
                self.max_agents
            );
        }

        if self.agents.len() > 2 {
            for agent in agents {
                self.add_agent(world, agent);
            }
        } else {
            // Too few residents for midpoint insertion to mean anything,
            // rebuild the spacing from scratch.
            self.agents.extend(agents);
            self.respace_evenly(0);
        }
    }

    /// Inserts one agent next to the two residents nearest to its actual
    /// position, keeping the list in angular order, then respaces only the
    /// agents after the insertion point. O(n) but leaves settled agents on
    /// their slots.
    pub fn add_agent<W>(&mut self, world: &W, mut agent: Agent)
    where
        W: Battlefield,
    {
        if self.agents.len() <= 2 {
            self.agents.push(agent);
            self.respace_evenly(0);
            return;
        }

        let relative_pos = world.unit_cell(agent.unit()) - self.center;

        // Two residents whose slot cells are nearest to where the newcomer
        // actually stands.
        let mut nearest = 0;
        let mut nearest_distance = f64::MAX;
        let mut second = 0;
        let mut second_distance = f64::MAX;
        for (index, resident) in self.agents.iter().enumerate() {
            let distance = (relative_pos - self.cells[resident.slot]).length_l2();

            if distance < nearest_distance {
                second_distance = nearest_distance;
                second = nearest;
                nearest_distance = distance;
                nearest = index;
            } else if distance < second_distance {
                second_distance = distance;
                second = index;
            }
        }

        let high = self.agents[nearest].slot.max(self.agents[second].slot);
        let low = self.agents[nearest].slot.min(self.agents[second].slot);

        // Midpoint of the neighbouring slots. When the pair straddles the
        // ring's wraparound (the arc through the end is the shorter one)
        // the historical tie-break below applies; it is deliberately kept
        // bit-for-bit since it determines placement order.
        agent.slot = if high - low > low + self.slot_count - high {
            ((low as f64 + 0.5 * (low + self.slot_count - high) as f64).round() as usize)
                % self.slot_count
        } else {
            (0.5 * (high + low) as f64).round() as usize
        };

        // Between the first and last list entries the insertion point is
        // the list end; everywhere else it is right after the lower index.
        let insert_at = if nearest.max(second) - nearest.min(second) == self.agents.len() - 1 {
            self.agents.len()
        } else {
            nearest.min(second) + 1
        };

        agent.target_cell = self.center + self.cells[agent.slot];
        self.agents.insert(insert_at, agent);

        // Push the agents after the insertion point outward, evenly spaced
        // from the new slot, wrapping slot numbers at the ring end.
        let step = self.slot_count as f64 / self.agents.len() as f64;
        let base = self.agents[insert_at].slot as f64;
        let mut acc = step;
        for index in insert_at + 1..self.agents.len() {
            self.agents[index].slot = ((base + acc).round() as usize) % self.slot_count;
            self.agents[index].target_cell = self.center + self.cells[self.agents[index].slot];
            acc += step;
        }
    }

    pub fn remove_agent(&mut self, index: usize) {
        self.remove_agents(vec![index]);
    }

    /// Removes the given list positions, then respaces the survivors
    /// evenly starting from the first survivor's current slot.
    pub fn remove_agents(&mut self, indices: Vec<usize>) {
        for index in indices.into_iter().sorted_by(|a, b| b.cmp(a)) {
            self.agents.remove(index);
        }

        if !self.agents.is_empty() {
            let start = self.agents[0].slot;
            self.respace_evenly(start);
        }
    }

    pub(crate) fn take_agents(&mut self) -> Vec<Agent> {
        std::mem::replace(&mut self.agents, Vec::new())
    }

    fn respace_evenly(&mut self, start_slot: usize) {
        let step = self.slot_count as f64 / self.agents.len() as f64;
        let mut acc = 0.0;
        for agent in &mut self.agents {
            agent.slot = ((start_slot as f64 + acc).round() as usize) % self.slot_count;
            agent.target_cell = self.center + self.cells[agent.slot];
            acc += step;
        }
    }

    /// Advances every agent, then runs the orbit's own once-per-period
    /// bookkeeping on its staggered tick. Returns whether the bookkeeping
    /// pass ran, so the owner can piggyback its dead-agent scan on it.
    pub fn on_tick<W>(&mut self, world: &mut W, tick: u32) -> bool
    where
        W: Battlefield,
    {
        for agent in &mut self.agents {
            agent.on_tick(world, tick);
        }

        if tick % ORBIT_PROCESSING_PERIOD != self.update_tact {
            return false;
        }

        if let Some(target) = self.attack_target {
            let captured = self
                .agents
                .first()
                .map(|agent| world.unit_owner(agent.unit()) == world.unit_owner(target))
                .unwrap_or(false);

            if world.is_dead(target) || captured {
                self.attack_target = None;
                for agent in &mut self.agents {
                    agent.assign_attack_target(world, None);
                }
            }
        }

        true
    }

    #[cfg(test)]
    pub fn attack_target(&self) -> Option<UnitId> {
        self.attack_target
    }

    #[cfg(test)]
    pub fn update_tact(&self) -> u32 {
        self.update_tact
    }
}
