use std::{fmt::Display, rc::Rc};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{DWELL_TIME_S, MAX_CONDITION},
    cost_tracker::CostTracker,
    driver::Driver,
    route::Route,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VehicleType {
    Bus,
    Tram,
}

impl Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            VehicleType::Bus => "Bus",
            VehicleType::Tram => "Tram",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VehicleKind {
    /// Fuel consumed per kilometer.
    Bus { fuel_consumption: f64 },
    /// Electricity consumed per kilometer.
    Tram { electricity_consumption: f64 },
}

impl VehicleKind {
    pub fn consumption_per_km(&self) -> f64 {
        match *self {
            VehicleKind::Bus { fuel_consumption } => fuel_consumption,
            VehicleKind::Tram {
                electricity_consumption,
            } => electricity_consumption,
        }
    }

    pub fn vehicle_type(&self) -> VehicleType {
        match self {
            VehicleKind::Bus { .. } => VehicleType::Bus,
            VehicleKind::Tram { .. } => VehicleType::Tram,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleState {
    Active,
    Broken,
}

impl Display for VehicleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            VehicleState::Active => "Active",
            VehicleState::Broken => "Broken",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn reversed(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

#[derive(Debug)]
pub struct Vehicle {
    pub line: Box<str>,
    pub route: Rc<Route>,
    pub driver: Driver,
    pub kind: VehicleKind,
    pub base_speed: f64,
    /// Track units covered per tick: the base speed scaled by the driver.
    pub speed: f64,
    /// Health from 0 (broken) to 10 (new).
    pub condition: u8,
    pub state: VehicleState,
    pub x: f64,
    pub direction: Direction,
    /// Seconds left to wait at the current stop.
    pub wait_timer: f64,
    /// Stop coordinates in the order of the current leg.
    pub stop_positions: Vec<i32>,
    pub next_stop_index: usize,
    pub active: bool,
    /// Simulation time (in seconds) at which the vehicle enters service.
    pub activation_time: f64,
    pub hours_driven: f64,
    pub time_broken: f64,
    pub breakdown_duration: f64,
    pub repair_duration: f64,
    pub cost_tracker: CostTracker,
}

impl Vehicle {
    pub fn new(
        line: &str,
        route: Rc<Route>,
        driver: Driver,
        kind: VehicleKind,
        base_speed: f64,
    ) -> Self {
        let start_x = route.bounds().left as f64;
        let cost_tracker = CostTracker::new(
            line,
            kind.vehicle_type(),
            driver.salary,
            kind.consumption_per_km(),
            start_x,
        );
        Vehicle {
            line: line.into(),
            stop_positions: route.stop_positions(),
            route,
            speed: base_speed * driver.speed_multiplier(),
            driver,
            kind,
            base_speed,
            condition: MAX_CONDITION,
            state: VehicleState::Active,
            x: start_x,
            direction: Direction::Forward,
            wait_timer: 0.0,
            next_stop_index: 0,
            active: false,
            activation_time: 0.0,
            hours_driven: 0.0,
            time_broken: 0.0,
            breakdown_duration: 0.0,
            repair_duration: 0.0,
            cost_tracker,
        }
    }

    pub fn bus(
        line: &str,
        route: Rc<Route>,
        driver: Driver,
        fuel_consumption: f64,
        speed: f64,
    ) -> Self {
        Self::new(
            line,
            route,
            driver,
            VehicleKind::Bus { fuel_consumption },
            speed,
        )
    }

    pub fn tram(
        line: &str,
        route: Rc<Route>,
        driver: Driver,
        electricity_consumption: f64,
        speed: f64,
    ) -> Self {
        Self::new(
            line,
            route,
            driver,
            VehicleKind::Tram {
                electricity_consumption,
            },
            speed,
        )
    }

    pub fn with_activation_time(mut self, activation_time: f64) -> Self {
        self.activation_time = activation_time;
        self
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.kind.vehicle_type()
    }

    /// Static cost of ownership: consumption over the whole line plus the driver's salary.
    pub fn calculate_cost(&self) -> f64 {
        self.kind.consumption_per_km() * self.route.length() + self.driver.salary
    }

    pub fn is_broken(&self) -> bool {
        self.state == VehicleState::Broken
    }

    /// Takes the vehicle out of service for a breakdown followed by a repair.
    pub fn break_down(&mut self, breakdown_duration: f64, repair_duration: f64) {
        self.condition = 0;
        self.state = VehicleState::Broken;
        self.time_broken = 0.0;
        self.breakdown_duration = breakdown_duration;
        self.repair_duration = repair_duration;
        info!(
            "{} broke down (stalled {:.0}s, repair {:.1}s)",
            self.line, breakdown_duration, repair_duration
        );
    }

    /// Advances the vehicle by one tick of `elapsed_ms`.
    ///
    /// Speed is given per tick and throttled by `delay_factor`.
    /// `current_time` is the simulation time in seconds.
    pub fn update(&mut self, elapsed_ms: f64, delay_factor: f64, current_time: f64) {
        let seconds = elapsed_ms.max(0.0) / 1000.0;

        if !self.active {
            if current_time < self.activation_time {
                return;
            }
            self.active = true;
            debug!("{} entered service at {:.1}s", self.line, current_time);
            if !self.is_broken() && self.next_stop_x() == Some(self.x) {
                self.arrive_at_next_stop();
                return;
            }
        }

        if self.state == VehicleState::Broken {
            self.time_broken += seconds;
            // Stalled, then under repair. The position stays frozen in both phases.
            if self.time_broken < self.breakdown_duration + self.repair_duration {
                return;
            }
            self.state = VehicleState::Active;
            self.time_broken = 0.0;
            self.condition = MAX_CONDITION;
            info!("{} repaired and back in service", self.line);
            return;
        }

        if self.wait_timer > 0.0 {
            self.wait_timer -= seconds;
            return;
        }

        let previous_x = self.x;
        self.advance(delay_factor);
        self.check_stop_arrival(previous_x);
    }

    fn advance(&mut self, delay_factor: f64) {
        let bounds = self.route.bounds();
        self.x += self.direction.sign() * (self.speed / delay_factor);

        let bound = match self.direction {
            Direction::Forward if self.x >= bounds.right as f64 => bounds.right,
            Direction::Backward if self.x <= bounds.left as f64 => bounds.left,
            _ => return,
        };
        self.x = bound as f64;
        self.turn_around();
    }

    fn turn_around(&mut self) {
        self.direction = self.direction.reversed();
        self.stop_positions.reverse();
        self.next_stop_index = 0;
    }

    fn next_stop_x(&self) -> Option<f64> {
        self.stop_positions
            .get(self.next_stop_index)
            .map(|&stop_x| stop_x as f64)
    }

    /// Serves the next stop if this tick's movement from `previous_x` reached
    /// or passed it.
    ///
    /// Only the stretch covered in this tick counts, so a stop behind the
    /// vehicle (such as the first stop after the index wrapped) is left for
    /// the return leg. The starting point is excluded, so leaving a stop
    /// never serves it twice.
    fn check_stop_arrival(&mut self, previous_x: f64) {
        let Some(stop_x) = self.next_stop_x() else {
            return;
        };
        let (from, to) = if previous_x <= self.x {
            (previous_x, self.x)
        } else {
            (self.x, previous_x)
        };
        if stop_x == previous_x || stop_x < from || stop_x > to {
            return;
        }
        self.arrive_at_next_stop();
    }

    fn arrive_at_next_stop(&mut self) {
        let Some(stop_x) = self.next_stop_x() else {
            return;
        };
        self.x = stop_x;
        self.wait_timer = DWELL_TIME_S;
        self.next_stop_index += 1;
        if self.next_stop_index >= self.stop_positions.len() {
            self.next_stop_index = 0;
        }
    }
}
