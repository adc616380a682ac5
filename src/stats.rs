use crate::cell::Cell;
use serde::Serialize;

/// Occupancy snapshot of a single orbit.
#[derive(Clone, Debug, Serialize)]
pub struct OrbitStats {
    pub radius: u32,
    pub slot_capacity: usize,
    pub occupancy: usize,
}

/// Point-in-time snapshot of the whole formation, for diagnostics and
/// external stats pipelines.
#[derive(Clone, Debug, Serialize)]
pub struct FormationStats {
    pub center: Cell,
    pub units: usize,
    pub orbits: Vec<OrbitStats>,
}
