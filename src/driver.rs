use std::fmt::Display;

use rand::{
    seq::{IndexedRandom, SliceRandom},
    Rng,
};

use crate::constants::{BASE_DRIVER_SALARY, DRIVER_SALARY_STEP};

/// Driving style of a driver, fixing how fast and how riskily they drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverProfile {
    Normal,
    Careful,
    Aggressive,
}

impl DriverProfile {
    pub const ALL: [DriverProfile; 3] = [
        DriverProfile::Careful,
        DriverProfile::Normal,
        DriverProfile::Aggressive,
    ];

    pub fn speed_multiplier(&self) -> f64 {
        match self {
            DriverProfile::Normal => 1.0,
            DriverProfile::Careful => 0.8,
            DriverProfile::Aggressive => 1.2,
        }
    }

    pub fn failure_risk_multiplier(&self) -> f64 {
        match self {
            DriverProfile::Normal => 1.0,
            DriverProfile::Careful => 0.5,
            DriverProfile::Aggressive => 3.0,
        }
    }
}

impl Display for DriverProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DriverProfile::Normal => "Normal",
            DriverProfile::Careful => "Careful",
            DriverProfile::Aggressive => "Aggressive",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub name: String,
    /// Salary in currency units per hour.
    pub salary: f64,
    pub profile: DriverProfile,
}

impl Driver {
    pub fn new(name: impl Into<String>, salary: f64, profile: DriverProfile) -> Self {
        Driver {
            name: name.into(),
            salary,
            profile,
        }
    }

    /// The driver assigned when the pool has run dry.
    pub fn fallback(index: usize) -> Self {
        Driver::new(
            format!("Default Driver {}", index),
            BASE_DRIVER_SALARY,
            DriverProfile::Normal,
        )
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.profile.speed_multiplier()
    }

    pub fn failure_risk_multiplier(&self) -> f64 {
        self.profile.failure_risk_multiplier()
    }
}

/// Hires `num_drivers` drivers with random profiles and rising salaries, in random order.
pub fn create_driver_pool(num_drivers: usize, rng: &mut impl Rng) -> Vec<Driver> {
    let mut drivers = (0..num_drivers)
        .map(|i| {
            let profile = *DriverProfile::ALL
                .choose(rng)
                .unwrap_or(&DriverProfile::Normal);
            Driver::new(
                format!("{} {}", profile, i + 1),
                BASE_DRIVER_SALARY + i as f64 * DRIVER_SALARY_STEP,
                profile,
            )
        })
        .collect::<Vec<_>>();
    drivers.shuffle(rng);
    drivers
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_profile_table() {
        let table = DriverProfile::ALL
            .iter()
            .map(|p| (*p, p.speed_multiplier(), p.failure_risk_multiplier()))
            .collect_vec();
        assert_eq!(
            table,
            vec![
                (DriverProfile::Careful, 0.8, 0.5),
                (DriverProfile::Normal, 1.0, 1.0),
                (DriverProfile::Aggressive, 1.2, 3.0),
            ]
        );
    }

    #[test]
    fn test_driver_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let pool = create_driver_pool(12, &mut rng);
        assert_eq!(pool.len(), 12);

        let salaries = pool
            .iter()
            .map(|d| d.salary as u32)
            .sorted()
            .collect_vec();
        assert_eq!(salaries, (0..12u32).map(|i| 3000 + i * 50).collect_vec());

        for driver in &pool {
            let (profile_name, number) = driver.name.split_once(' ').unwrap();
            assert_eq!(profile_name, driver.profile.to_string());
            let number: usize = number.parse().unwrap();
            assert_eq!(driver.salary, 3000.0 + (number - 1) as f64 * 50.0);
        }
    }

    #[test]
    fn test_fallback_driver() {
        let driver = Driver::fallback(4);
        assert_eq!(driver.name, "Default Driver 4");
        assert_eq!(driver.salary, 3000.0);
        assert_eq!(driver.profile, DriverProfile::Normal);
    }
}
