use crate::{
    constants::{TRACK_LEFT_BOUND, TRACK_RIGHT_BOUND},
    traffic::Traffic,
};

/// The stretch of the 1-D track vehicles move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackBounds {
    pub left: i32,
    pub right: i32,
}

impl Default for TrackBounds {
    fn default() -> Self {
        TrackBounds {
            left: TRACK_LEFT_BOUND,
            right: TRACK_RIGHT_BOUND,
        }
    }
}

impl TrackBounds {
    pub fn span(&self) -> i32 {
        self.right - self.left
    }

    pub fn center(&self) -> i32 {
        self.left + self.span() / 2
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    line: Box<str>,
    stops: Vec<String>,
    /// Length of the line in kilometers.
    length: f64,
    traffic: Traffic,
    bounds: TrackBounds,
}

impl Route {
    pub fn new(line: &str, stops: Vec<String>, length: f64, traffic: Traffic) -> Self {
        Self::with_bounds(line, stops, length, traffic, TrackBounds::default())
    }

    pub fn with_bounds(
        line: &str,
        stops: Vec<String>,
        length: f64,
        traffic: Traffic,
        bounds: TrackBounds,
    ) -> Self {
        Route {
            line: line.into(),
            stops,
            length,
            traffic,
            bounds,
        }
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    pub fn bounds(&self) -> TrackBounds {
        self.bounds
    }

    pub fn delay_factor(&self) -> f64 {
        self.traffic.delay_factor()
    }

    /// Track coordinates of the stops, evenly spaced between the bounds.
    ///
    /// The spacing is floored, so the last stop may sit slightly left of the
    /// right bound. A route with at most one stop gets a single centered stop.
    pub fn stop_positions(&self) -> Vec<i32> {
        if self.stops.len() <= 1 {
            return vec![self.bounds.center()];
        }
        let spacing = self.bounds.span() / (self.stops.len() as i32 - 1);
        (0..self.stops.len() as i32)
            .map(|i| self.bounds.left + i * spacing)
            .collect()
    }
}
