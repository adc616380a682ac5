use crate::agent::Agent;
use crate::battlefield::*;
use crate::cell::Cell;
use crate::constants::*;
use crate::orbit::Orbit;
use crate::stats::{FormationStats, OrbitStats};
use itertools::Itertools;
use log::*;
use serde::{Deserialize, Serialize};

/// Constructor-time configuration, fixed for the formation's lifetime.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FormationConfig {
    pub center: Cell,
    pub start_radius: u32,
    /// Fraction of perimeter cells usable per orbit, e.g. 1/3. Gaps keep
    /// the ring from overcrowding.
    pub density: f64,
}

/// Entry point for the owning hero behavior: manages the whole escort as
/// concentric orbits around a moving center, hiding how many orbits exist
/// or how slots are packed.
pub struct Formation {
    center: Cell,
    orbits: Vec<Orbit>,
    density: f64,
    /// Tick at which the last composition change happened. While set, the
    /// formation rebalances once REFORMATION_DELAY_TICKS pass without a
    /// further change.
    reformation_ordered_at: Option<u32>,
    tick: u32,
    /// Stagger counter handed to orbits at creation so their bookkeeping
    /// passes do not coincide.
    next_update_tact: u32,
}

impl Formation {
    pub fn new(config: FormationConfig) -> Formation {
        let mut formation = Formation {
            center: config.center,
            orbits: Vec::new(),
            density: config.density,
            reformation_ordered_at: None,
            tick: 0,
            next_update_tact: ORBIT_STAGGER_SEED,
        };

        let orbit = formation.create_orbit(config.start_radius);
        formation.orbits.push(orbit);
        formation
    }

    fn create_orbit(&mut self, radius: u32) -> Orbit {
        let update_tact = self.next_update_tact % ORBIT_PROCESSING_PERIOD;
        self.next_update_tact += 1;
        Orbit::new(self.center, radius, self.density, update_tact)
    }

    pub fn units_count(&self) -> usize {
        self.orbits.iter().map(|orbit| orbit.agents.len()).sum()
    }

    pub fn add_units<W>(&mut self, world: &W, units: &[UnitId])
    where
        W: Battlefield,
    {
        if units.is_empty() {
            return;
        }

        self.reformation_ordered_at = Some(self.tick);

        let agents = units.iter().map(|&unit| Agent::new(unit)).collect();
        self.distribute_agents(world, agents);
    }

    /// Removes the wrappers matching the given units, wherever they sit.
    /// Units are matched by stable identity.
    pub fn remove_units(&mut self, units: &[UnitId]) {
        let mut removed_any = false;

        for orbit in &mut self.orbits {
            let indices: Vec<_> = orbit
                .agents
                .iter()
                .positions(|agent| units.contains(&agent.unit()))
                .collect();

            if !indices.is_empty() {
                removed_any = true;
                orbit.remove_agents(indices);
            }
        }

        if removed_any {
            self.reformation_ordered_at = Some(self.tick);
        }
    }

    pub fn set_center(&mut self, center: Cell) {
        self.center = center;
        for orbit in &mut self.orbits {
            orbit.set_center(center);
        }
    }

    pub fn set_attack_target<W>(&mut self, world: &mut W, target: Option<UnitId>)
    where
        W: Battlefield,
    {
        for orbit in &mut self.orbits {
            orbit.set_attack_target(world, target);
        }
    }

    /// Smart-attacks the area around `cell`: every orbit strikes its own
    /// footprint translated there.
    pub fn smart_attack_cell<W>(&mut self, world: &mut W, cell: Cell)
    where
        W: Battlefield,
    {
        for orbit in &mut self.orbits {
            orbit.smart_attack_command(world, cell);
        }
    }

    /// Cancels any engagement and recalls every agent to its slot.
    pub fn smart_move_to_formation<W>(&mut self, world: &mut W)
    where
        W: Battlefield,
    {
        for orbit in &mut self.orbits {
            orbit.return_to_slots_command(world);
        }
    }

    /// Must be called exactly once per simulation tick, in increasing tick
    /// order. Skipped ticks only degrade staggering fairness.
    pub fn on_every_tick<W>(&mut self, world: &mut W, tick: u32)
    where
        W: Battlefield,
    {
        self.tick = tick;

        let mut composition_changed = false;
        for orbit in &mut self.orbits {
            if !orbit.on_tick(world, tick) {
                continue;
            }

            // Piggyback the dead-agent scan on the orbit's own staggered
            // bookkeeping pass.
            let dead: Vec<_> = orbit
                .agents
                .iter()
                .positions(|agent| world.is_dead(agent.unit()))
                .collect();

            if !dead.is_empty() {
                debug!(
                    "removing {} dead agents from orbit radius {}",
                    dead.len(),
                    orbit.radius
                );
                composition_changed = true;
                orbit.remove_agents(dead);
            }
        }

        if composition_changed {
            self.reformation_ordered_at = Some(tick);
        }

        if let Some(ordered_at) = self.reformation_ordered_at {
            if tick >= ordered_at + REFORMATION_DELAY_TICKS {
                self.reformation_ordered_at = None;
                self.reformation(world);
            }
        }
    }

    pub fn stats(&self) -> FormationStats {
        FormationStats {
            center: self.center,
            units: self.units_count(),
            orbits: self
                .orbits
                .iter()
                .map(|orbit| OrbitStats {
                    radius: orbit.radius,
                    slot_capacity: orbit.max_agents,
                    occupancy: orbit.agents.len(),
                })
                .collect(),
        }
    }

    pub fn stats_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.stats())
    }

    /// Extracts every agent from every orbit and redistributes the full
    /// set, restoring even spacing after accumulated local edits.
    fn reformation<W>(&mut self, world: &W)
    where
        W: Battlefield,
    {
        debug!("reformation of {} units", self.units_count());

        let mut agents = Vec::new();
        for orbit in &mut self.orbits {
            agents.append(&mut orbit.take_agents());
        }

        self.distribute_agents(world, agents);
    }

    /// Packs agents into orbits from the inside outward, growing a new
    /// orbit one radius step further whenever the current ones are full.
    fn distribute_agents<W>(&mut self, world: &W, agents: Vec<Agent>)
    where
        W: Battlefield,
    {
        if agents.is_empty() {
            return;
        }

        // Degenerate geometry: no orbit will ever have a usable slot, so
        // growing further orbits would never terminate.
        if self.density <= 0.0 {
            warn!("formation density {} leaves no usable slots, ignoring {} agents", self.density, agents.len());
            return;
        }

        let mut batches: Vec<Vec<Agent>> = self.orbits.iter().map(|_| Vec::new()).collect();

        let mut orbit_num = 0;
        for agent in agents {
            // The batch destined for an orbit counts against its capacity
            // just like the agents already on it.
            while self.orbits[orbit_num].max_agents
                <= self.orbits[orbit_num].agents.len() + batches[orbit_num].len()
            {
                orbit_num += 1;
                if orbit_num == self.orbits.len() {
                    let radius = self.orbits[orbit_num - 1].radius + 1;
                    info!("growing formation: new orbit at radius {}", radius);
                    let orbit = self.create_orbit(radius);
                    self.orbits.push(orbit);
                    batches.push(Vec::new());
                }
            }

            batches[orbit_num].push(agent);
        }

        for (orbit, batch) in self.orbits.iter_mut().zip(batches) {
            orbit.add_agents(world, batch);
        }
    }

    #[cfg(test)]
    pub(crate) fn orbits(&self) -> &[Orbit] {
        &self.orbits
    }

    #[cfg(test)]
    pub(crate) fn reformation_pending(&self) -> bool {
        self.reformation_ordered_at.is_some()
    }
}
