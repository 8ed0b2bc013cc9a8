use log::debug;
use rand::Rng;

use crate::{
    constants::{BREAKDOWN_DURATION_RANGE_S, REPAIR_DURATION_RANGE_S},
    driver::Driver,
    vehicle::Vehicle,
};

/// Injects random failures that wear vehicles down until they break.
#[derive(Debug, Clone, Copy)]
pub struct Maintenance {
    base_failure_chance: f64,
}

/// How much riskier a vehicle in `condition` is, scaled by its driver's style.
pub fn risk_multiplier(condition: u8, driver: &Driver) -> f64 {
    (11.0 - condition as f64) * driver.failure_risk_multiplier()
}

impl Maintenance {
    pub fn new(base_failure_chance_per_second: f64) -> Self {
        Maintenance {
            base_failure_chance: base_failure_chance_per_second,
        }
    }

    pub fn base_failure_chance(&self) -> f64 {
        self.base_failure_chance
    }

    /// Runs one failure trial for a tick of `elapsed_ms`.
    ///
    /// A failure lowers the condition by one. Reaching zero breaks the vehicle
    /// down and bills the repair to its cost tracker. Broken vehicles are left alone.
    pub fn check_failure(&self, vehicle: &mut Vehicle, elapsed_ms: f64, rng: &mut impl Rng) {
        if vehicle.condition == 0 {
            return;
        }
        let seconds = elapsed_ms.max(0.0) / 1000.0;
        vehicle.hours_driven += seconds / 3600.0;

        let failure_chance =
            self.base_failure_chance * risk_multiplier(vehicle.condition, &vehicle.driver);
        if rng.random::<f64>() >= failure_chance * seconds {
            return;
        }

        vehicle.condition -= 1;
        debug!("{} lost condition, now {}", vehicle.line, vehicle.condition);
        if vehicle.condition > 0 {
            return;
        }

        let breakdown_duration = rng.random_range(BREAKDOWN_DURATION_RANGE_S) as f64;
        let repair_duration = rng.random_range(REPAIR_DURATION_RANGE_S);
        vehicle.break_down(breakdown_duration, repair_duration);
        vehicle.cost_tracker.add_repair_cost(repair_duration);
    }
}

impl Default for Maintenance {
    fn default() -> Self {
        Maintenance::new(crate::constants::BASE_FAILURE_CHANCE_PER_SECOND)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        driver::DriverProfile,
        test::sample::{normal_driver, sample_route},
        vehicle::VehicleState,
    };

    fn sample_bus() -> Vehicle {
        let mut bus = Vehicle::bus(
            "B2",
            sample_route(&["A", "B"], 10.0, 2),
            normal_driver(2000.0),
            0.3,
            1.0,
        );
        bus.active = true;
        bus
    }

    #[test]
    fn test_risk_multiplier() {
        for profile in DriverProfile::ALL {
            let driver = Driver::new("D", 3000.0, profile);
            for condition in 1..=10 {
                assert_eq!(
                    risk_multiplier(condition, &driver),
                    (11 - condition) as f64 * profile.failure_risk_multiplier()
                );
            }
            for condition in 1..10 {
                assert!(risk_multiplier(condition, &driver) > risk_multiplier(condition + 1, &driver));
            }
        }
    }

    #[test]
    fn test_guaranteed_breakdown() {
        let maintenance = Maintenance::new(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut bus = sample_bus();
        bus.condition = 1;

        maintenance.check_failure(&mut bus, 1000.0, &mut rng);

        assert_eq!(bus.state, VehicleState::Broken);
        assert_eq!(bus.condition, 0);
        assert_eq!(bus.time_broken, 0.0);
        assert!((5.0..=30.0).contains(&bus.breakdown_duration));
        assert_eq!(bus.breakdown_duration.fract(), 0.0);
        assert!((5.0..=15.0).contains(&bus.repair_duration));
        assert_eq!(bus.cost_tracker.repair_cost(), bus.repair_duration);
    }

    #[test]
    fn test_breakdown_lasts_until_repaired() {
        let maintenance = Maintenance::new(1.0);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut bus = sample_bus();
            bus.condition = 1;
            maintenance.check_failure(&mut bus, 1000.0, &mut rng);
            assert!(bus.is_broken());

            let out_of_service = bus.breakdown_duration + bus.repair_duration;
            let x = bus.x;
            let mut elapsed = 0.0;
            loop {
                maintenance.check_failure(&mut bus, 100.0, &mut rng);
                bus.update(100.0, 1.0, 0.0);
                elapsed += 0.1;
                if elapsed < out_of_service {
                    assert!(bus.is_broken());
                    assert_eq!(bus.x, x);
                } else {
                    assert_eq!(bus.state, VehicleState::Active);
                    assert_eq!(bus.condition, 10);
                    break;
                }
            }
        }
    }

    #[test]
    fn test_zero_chance_never_fails() {
        let maintenance = Maintenance::new(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut bus = sample_bus();
        for _ in 0..3600 {
            maintenance.check_failure(&mut bus, 1000.0, &mut rng);
        }
        assert_eq!(bus.condition, 10);
        approx::assert_relative_eq!(bus.hours_driven, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_condition_degrades_step_by_step() {
        let maintenance = Maintenance::new(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut bus = sample_bus();
        let mut last_condition = bus.condition;
        // Each trial at a one second tick is certain to fail.
        for _ in 0..10 {
            maintenance.check_failure(&mut bus, 1000.0, &mut rng);
            assert_eq!(bus.condition, last_condition - 1);
            last_condition = bus.condition;
        }
        assert!(bus.is_broken());
        assert!(bus.cost_tracker.repair_cost() >= 5.0);
    }

    #[test]
    fn test_broken_vehicle_is_not_checked() {
        let maintenance = Maintenance::new(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut bus = sample_bus();
        bus.break_down(10.0, 10.0);
        maintenance.check_failure(&mut bus, 1000.0, &mut rng);
        assert_eq!(bus.hours_driven, 0.0);
        assert_eq!(bus.cost_tracker.repair_cost(), 0.0);
    }
}
