#![warn(clippy::all)]

//! Ring-formation management for a squad of combat agents: keeps a
//! variable-size group arranged on concentric square orbits around a
//! moving center, routes per-tick move/attack orders to each unit, and
//! rebalances the arrangement with a debounce as units join, leave or die.
//!
//! The crate never owns units; it drives them through the [`Battlefield`]
//! seam implemented by the embedding simulation and must be ticked once
//! per simulation tick via [`Formation::on_every_tick`].

pub mod agent;
pub mod battlefield;
pub mod cell;
pub mod constants;
pub mod formation;
pub mod logging;
pub mod orbit;
pub mod stats;

#[cfg(test)]
mod testutil;

pub use crate::battlefield::{Battlefield, OrderKind, OrderMode, PlayerId, UnitId};
pub use crate::cell::Cell;
pub use crate::formation::{Formation, FormationConfig};
pub use crate::stats::{FormationStats, OrbitStats};
