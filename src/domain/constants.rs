// Tick grid bounds shared by price conversion and order validation.
// A tick outside this range has no representable price.
pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

/// Base of the discretized price grid: price doubles roughly every 6932 ticks.
pub const TICK_BASE: f64 = 1.0001;
