//! Fixed process constants of the simulated network.

pub const SCREEN_WIDTH: i32 = 1000;
pub const PANEL_WIDTH: i32 = 140;
pub const PANEL_LEFT_X: i32 = SCREEN_WIDTH - PANEL_WIDTH;

/// Leftmost track coordinate a vehicle can reach.
pub const TRACK_LEFT_BOUND: i32 = 50;
/// Rightmost track coordinate a vehicle can reach.
pub const TRACK_RIGHT_BOUND: i32 = PANEL_LEFT_X - 10;

/// Number of vehicles operating on every line.
pub const VEHICLES_PER_LINE: usize = 3;
/// Seconds between the activation of two consecutive vehicles of a line.
pub const ACTIVATION_STAGGER_S: f64 = 15.0;

/// Seconds a vehicle waits at every stop.
pub const DWELL_TIME_S: f64 = 5.0;
/// Condition of a new or freshly repaired vehicle.
pub const MAX_CONDITION: u8 = 10;

pub const BASE_FAILURE_CHANCE_PER_SECOND: f64 = 0.01;
pub const BREAKDOWN_DURATION_RANGE_S: std::ops::RangeInclusive<u32> = 5..=30;
pub const REPAIR_DURATION_RANGE_S: std::ops::RangeInclusive<f64> = 5.0..=15.0;
/// Repair cost in currency units per second of repair.
pub const REPAIR_COST_PER_SECOND: f64 = 1.0;
/// Track units per kilometer (one unit is one meter).
pub const TRACK_UNITS_PER_KM: f64 = 1000.0;

pub const BASE_DRIVER_SALARY: f64 = 3000.0;
pub const DRIVER_SALARY_STEP: f64 = 50.0;

/// Simulation seconds covered by one export bucket.
pub const EXPORT_INTERVAL_S: u64 = 10;
pub const TARGET_FPS: u32 = 60;
