/// Period of the staggered per-orbit bookkeeping pass, in ticks.
pub const ORBIT_PROCESSING_PERIOD: u32 = 25;

/// Seed for the per-formation stagger counter that spreads orbit
/// bookkeeping across the processing period.
pub const ORBIT_STAGGER_SEED: u32 = 12;

/// Ticks without a composition change before a pending reformation runs.
pub const REFORMATION_DELAY_TICKS: u32 = 250;

/// Maximum Chebyshev distance at which an agent keeps chasing its
/// assigned attack target.
pub const ATTACK_ENGAGE_RANGE: i32 = 28;

/// Maximum Chebyshev distance from the formation slot at which an agent
/// is still allowed to engage instead of regrouping.
pub const ATTACK_HOLD_RANGE: i32 = 24;

/// Chebyshev distance past which an agent is forcibly recalled to its slot.
pub const LEASH_RANGE: i32 = 16;
