use std::rc::Rc;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    constants::EXPORT_INTERVAL_S,
    cost_tracker::CostRecord,
    driver::create_driver_pool,
    maintenance::Maintenance,
    network::{build_fleet, num_vehicles, Line},
    route::Route,
    vehicle::{Direction, Vehicle, VehicleState, VehicleType},
};

/// What a renderer may know about a vehicle in service.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleView<'a> {
    pub id: &'a str,
    pub line: &'a str,
    pub vehicle_type: VehicleType,
    pub x: f64,
    pub direction: Direction,
    pub state: VehicleState,
    pub driver_name: &'a str,
    pub condition: u8,
    pub hours_driven: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteView<'a> {
    pub line: &'a str,
    pub stops: &'a [String],
    pub stop_positions: Vec<i32>,
}

pub struct Simulation {
    routes: Vec<Rc<Route>>,
    vehicles: Vec<Vehicle>,
    maintenance: Maintenance,
    rng: ChaCha8Rng,
    elapsed_ms: f64,
    last_export_bucket: u64,
}

impl Simulation {
    /// Staffs the fleet of `lines` from a random driver pool drawn with `seed`.
    pub fn new(lines: Vec<Line>, maintenance: Maintenance, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drivers = create_driver_pool(num_vehicles(&lines), &mut rng);
        let (routes, vehicles) = build_fleet(lines, drivers);
        info!(
            "Simulating {} vehicles on {} lines (seed {}, failure chance {}/s)",
            vehicles.len(),
            routes.len(),
            seed,
            maintenance.base_failure_chance()
        );
        Self::from_fleet(routes, vehicles, maintenance, rng)
    }

    pub fn from_fleet(
        routes: Vec<Rc<Route>>,
        vehicles: Vec<Vehicle>,
        maintenance: Maintenance,
        rng: ChaCha8Rng,
    ) -> Self {
        Simulation {
            routes,
            vehicles,
            maintenance,
            rng,
            elapsed_ms: 0.0,
            last_export_bucket: 0,
        }
    }

    /// Simulation time in seconds.
    pub fn time_s(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    pub fn routes(&self) -> &[Rc<Route>] {
        &self.routes
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Advances every vehicle by `elapsed_ms`, in fleet order.
    ///
    /// Each vehicle first runs its failure trial, then moves, then has its
    /// costs sampled. Vehicles not yet in service skip the trial and the sampling.
    pub fn tick(&mut self, elapsed_ms: f64) {
        let elapsed_ms = elapsed_ms.max(0.0);
        self.elapsed_ms += elapsed_ms;
        let now = self.time_s();

        for vehicle in &mut self.vehicles {
            if vehicle.active {
                self.maintenance
                    .check_failure(vehicle, elapsed_ms, &mut self.rng);
            }
            let delay_factor = vehicle.route.delay_factor();
            vehicle.update(elapsed_ms, delay_factor, now);
            if vehicle.active {
                let x = vehicle.x;
                vehicle.cost_tracker.update(x, elapsed_ms);
            }
        }
    }

    /// The ledgers of all vehicles in service, stamped with the current time.
    pub fn cost_records(&self) -> Vec<CostRecord> {
        let now = self.time_s();
        self.vehicles
            .iter()
            .filter(|v| v.active)
            .map(|v| v.cost_tracker.snapshot(now))
            .collect()
    }

    /// Returns the ledgers once per crossed export interval, `None` in between.
    pub fn take_due_export(&mut self) -> Option<Vec<CostRecord>> {
        let bucket = (self.time_s() as u64 / EXPORT_INTERVAL_S) * EXPORT_INTERVAL_S;
        if bucket <= self.last_export_bucket {
            return None;
        }
        self.last_export_bucket = bucket;
        let records = self.cost_records();
        debug!("Export due at {}s: {} rows", bucket, records.len());
        Some(records)
    }

    pub fn vehicle_views(&self) -> impl Iterator<Item = VehicleView<'_>> {
        self.vehicles
            .iter()
            .filter(|v| v.active)
            .map(|v| VehicleView {
                id: &v.line,
                line: v.route.line(),
                vehicle_type: v.vehicle_type(),
                x: v.x,
                direction: v.direction,
                state: v.state,
                driver_name: &v.driver.name,
                condition: v.condition,
                hours_driven: v.hours_driven,
            })
    }

    pub fn route_views(&self) -> impl Iterator<Item = RouteView<'_>> {
        self.routes.iter().map(|route| RouteView {
            line: route.line(),
            stops: route.stops(),
            stop_positions: route.stop_positions(),
        })
    }
}
