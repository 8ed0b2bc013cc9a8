use itertools::Itertools;

use crate::{
    col::{map_new, HashMap},
    cost_tracker::CostRecord,
    vehicle::VehicleType,
};

/// Costs of all vehicles of one type, added up.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub vehicle_type: VehicleType,
    pub vehicles: usize,
    pub fuel_or_energy_cost: f64,
    pub salary_cost: f64,
    pub repair_cost: f64,
    pub total_cost: f64,
}

impl CostSummary {
    fn new(vehicle_type: VehicleType) -> Self {
        CostSummary {
            vehicle_type,
            vehicles: 0,
            fuel_or_energy_cost: 0.0,
            salary_cost: 0.0,
            repair_cost: 0.0,
            total_cost: 0.0,
        }
    }

    fn add(&mut self, record: &CostRecord) {
        self.vehicles += 1;
        self.fuel_or_energy_cost += record.fuel_or_energy_cost;
        self.salary_cost += record.salary_cost;
        self.repair_cost += record.repair_cost;
        self.total_cost += record.total_cost;
    }
}

/// Groups one ledger snapshot per vehicle by vehicle type, buses first.
pub fn summarize(records: &[CostRecord]) -> Vec<CostSummary> {
    let mut by_type: HashMap<VehicleType, CostSummary> = map_new();
    for record in records {
        by_type
            .entry(record.vehicle_type)
            .or_insert_with(|| CostSummary::new(record.vehicle_type))
            .add(record);
    }
    by_type
        .into_values()
        .sorted_by_key(|summary| summary.vehicle_type)
        .collect()
}
