use serde::{Serialize, Serializer};

use crate::{
    constants::{REPAIR_COST_PER_SECOND, TRACK_UNITS_PER_KM},
    vehicle::VehicleType,
};

/// Running ledger of what a single vehicle has cost so far.
#[derive(Debug, Clone)]
pub struct CostTracker {
    vehicle_id: Box<str>,
    vehicle_type: VehicleType,
    salary_per_hour: f64,
    consumption_per_km: f64,
    salary: f64,
    energy: f64,
    repair: f64,
    last_x: f64,
}

impl CostTracker {
    pub fn new(
        vehicle_id: &str,
        vehicle_type: VehicleType,
        salary_per_hour: f64,
        consumption_per_km: f64,
        start_x: f64,
    ) -> Self {
        CostTracker {
            vehicle_id: vehicle_id.into(),
            vehicle_type,
            salary_per_hour,
            consumption_per_km,
            salary: 0.0,
            energy: 0.0,
            repair: 0.0,
            last_x: start_x,
        }
    }

    /// Samples the vehicle position after a tick of `elapsed_ms`.
    ///
    /// The salary accrues for every tick, moving or not. Fuel or electricity
    /// only accrues for the distance covered since the previous sample.
    pub fn update(&mut self, x: f64, elapsed_ms: f64) {
        let seconds = elapsed_ms.max(0.0) / 1000.0;
        self.salary += self.salary_per_hour / 3600.0 * seconds;

        let distance_km = (x - self.last_x).abs() / TRACK_UNITS_PER_KM;
        self.energy += self.consumption_per_km * distance_km;
        self.last_x = x;
    }

    pub fn add_repair_cost(&mut self, seconds: f64) {
        self.repair += seconds * REPAIR_COST_PER_SECOND;
    }

    pub fn salary_cost(&self) -> f64 {
        self.salary
    }

    pub fn energy_cost(&self) -> f64 {
        self.energy
    }

    pub fn repair_cost(&self) -> f64 {
        self.repair
    }

    pub fn total_cost(&self) -> f64 {
        self.salary + self.energy + self.repair
    }

    pub fn snapshot(&self, time_s: f64) -> CostRecord {
        CostRecord {
            time_seconds: time_s.max(0.0) as u64,
            vehicle_id: self.vehicle_id.to_string(),
            vehicle_type: self.vehicle_type,
            fuel_or_energy_cost: round_cents(self.energy),
            salary_cost: round_cents(self.salary),
            repair_cost: round_cents(self.repair),
            total_cost: round_cents(self.total_cost()),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{:.2}", value))
}

/// One exported row of a vehicle's ledger.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostRecord {
    pub time_seconds: u64,
    pub vehicle_id: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[serde(serialize_with = "two_decimals")]
    pub fuel_or_energy_cost: f64,
    #[serde(serialize_with = "two_decimals")]
    pub salary_cost: f64,
    #[serde(serialize_with = "two_decimals")]
    pub repair_cost: f64,
    #[serde(serialize_with = "two_decimals")]
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_salary_accrues_without_movement() {
        let mut tracker = CostTracker::new("B1", VehicleType::Bus, 3600.0, 0.3, 50.0);
        for _ in 0..3600 {
            tracker.update(50.0, 1000.0);
        }
        assert_relative_eq!(tracker.salary_cost(), 3600.0, epsilon = 1e-9);
        assert_eq!(tracker.energy_cost(), 0.0);
    }

    #[test]
    fn test_energy_follows_distance() {
        let mut tracker = CostTracker::new("T1", VehicleType::Tram, 0.0, 0.5, 50.0);
        tracker.update(850.0, 16.0);
        tracker.update(350.0, 16.0);
        // 800 m + 500 m at 0.5 per km
        assert_relative_eq!(tracker.energy_cost(), 0.65, epsilon = 1e-12);
        assert_eq!(tracker.salary_cost(), 0.0);
    }

    #[test]
    fn test_repair_cost() {
        let mut tracker = CostTracker::new("B2", VehicleType::Bus, 3000.0, 0.3, 50.0);
        tracker.add_repair_cost(7.5);
        tracker.add_repair_cost(12.25);
        assert_eq!(tracker.repair_cost(), 19.75);
        assert_eq!(tracker.total_cost(), 19.75);
    }

    #[test]
    fn test_snapshot() {
        let mut tracker = CostTracker::new("T4", VehicleType::Tram, 3600.0, 1.0, 50.0);
        tracker.update(1050.0, 2500.0);
        tracker.add_repair_cost(10.004);

        let record = tracker.snapshot(42.9);
        assert_eq!(
            record,
            CostRecord {
                time_seconds: 42,
                vehicle_id: "T4".to_string(),
                vehicle_type: VehicleType::Tram,
                fuel_or_energy_cost: 1.0,
                salary_cost: 2.5,
                repair_cost: 10.0,
                total_cost: 13.5,
            }
        );
        // Taking a snapshot leaves the ledger untouched.
        assert_eq!(tracker.repair_cost(), 10.004);
    }
}
