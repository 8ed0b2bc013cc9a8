use std::rc::Rc;

use log::warn;
use serde::Deserialize;

use crate::{
    constants::{ACTIVATION_STAGGER_S, VEHICLES_PER_LINE},
    driver::Driver,
    route::Route,
    traffic::{TimePeriod, Traffic},
    vehicle::{Vehicle, VehicleType},
};

/// A route together with the type of vehicle serving it.
#[derive(Debug, Clone)]
pub struct Line {
    pub vehicle_type: VehicleType,
    pub route: Route,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct LineRecord {
    line: String,
    #[serde(rename = "mode")]
    vehicle_type: VehicleType,
    stops: String,
    length: f64,
    intensity: u32,
    period: TimePeriod,
}

#[derive(Debug)]
pub enum LoadLinesError {
    CsvError(csv::Error),
    InvalidValue(Box<str>),
    NoLines,
}

fn reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).delimiter(b';');

    builder
}

/// Parses a `;`-separated lines file with the columns
/// `line;mode;stops;length;intensity;period`. Stops are separated by `|`.
pub fn load_lines(stream: impl std::io::Read) -> Result<Vec<Line>, LoadLinesError> {
    let records = reader()
        .from_reader(stream)
        .deserialize()
        .collect::<Result<Vec<LineRecord>, csv::Error>>()
        .map_err(LoadLinesError::CsvError)?;
    if records.is_empty() {
        return Err(LoadLinesError::NoLines);
    }

    records
        .into_iter()
        .map(|record| {
            if record.length.is_nan() || record.length <= 0.0 {
                return Err(LoadLinesError::InvalidValue(
                    format!("Length of line {} must be positive!", record.line).into(),
                ));
            }
            let stops = record
                .stops
                .split('|')
                .map(str::trim)
                .filter(|stop| !stop.is_empty())
                .map(String::from)
                .collect::<Vec<_>>();
            if stops.is_empty() {
                warn!(
                    "Line {} has no stops, placing a single stop at the track center",
                    record.line
                );
            }
            Ok(Line {
                vehicle_type: record.vehicle_type,
                route: Route::new(
                    &record.line,
                    stops,
                    record.length,
                    Traffic::new(record.intensity, record.period),
                ),
            })
        })
        .collect()
}

/// The built-in network: two bus lines followed by two tram lines.
pub fn default_lines() -> Vec<Line> {
    let line = |name: &str,
                vehicle_type: VehicleType,
                stops: [&str; 4],
                length: f64,
                intensity: u32,
                period: TimePeriod| Line {
        vehicle_type,
        route: Route::new(
            name,
            stops.iter().map(|s| s.to_string()).collect(),
            length,
            Traffic::new(intensity, period),
        ),
    };
    vec![
        line(
            "1",
            VehicleType::Bus,
            ["Dworzec Główny", "Rynek", "Opera", "Narodowe Forum Muzyki"],
            12.0,
            4,
            TimePeriod::Morning,
        ),
        line(
            "2",
            VehicleType::Bus,
            [
                "Park Południowy",
                "Aquapark",
                "Dworzec Autobusowy",
                "Plac Świebodzki",
            ],
            10.0,
            3,
            TimePeriod::Midday,
        ),
        line(
            "3",
            VehicleType::Tram,
            ["Swojczyce", "Pasaż Grunwaldzki", "Zoo", "Krzyki"],
            11.0,
            5,
            TimePeriod::Afternoon,
        ),
        line(
            "4",
            VehicleType::Tram,
            [
                "Metalowców",
                "Stadion Olimpijski",
                "Na Ostatnim Groszu",
                "Grabiszyński Park",
            ],
            13.0,
            6,
            TimePeriod::Evening,
        ),
    ]
}

pub fn num_vehicles(lines: &[Line]) -> usize {
    lines.len() * VEHICLES_PER_LINE
}

/// Puts [`VEHICLES_PER_LINE`] vehicles on every line, in line then slot order.
///
/// Drivers are taken from the front of `drivers`. Once the pool is exhausted,
/// a default driver is hired instead.
pub fn build_fleet(lines: Vec<Line>, drivers: Vec<Driver>) -> (Vec<Rc<Route>>, Vec<Vehicle>) {
    let mut drivers = drivers.into_iter();
    let mut num_buses = 0;
    let mut num_trams = 0;
    let mut routes = Vec::with_capacity(lines.len());
    let mut vehicles = Vec::with_capacity(num_vehicles(&lines));

    for (line_index, line) in lines.into_iter().enumerate() {
        let route = Rc::new(line.route);
        for slot in 0..VEHICLES_PER_LINE {
            let driver = drivers.next().unwrap_or_else(|| {
                let index = line_index * VEHICLES_PER_LINE + slot;
                warn!("Driver pool exhausted, hiring a default driver for slot {}", index);
                Driver::fallback(index)
            });
            let i = slot as f64;
            let vehicle = match line.vehicle_type {
                VehicleType::Bus => {
                    num_buses += 1;
                    Vehicle::bus(
                        &format!("B{}", num_buses),
                        route.clone(),
                        driver,
                        0.3 + i * 0.05,
                        0.7 + i * 0.05,
                    )
                }
                VehicleType::Tram => {
                    num_trams += 1;
                    Vehicle::tram(
                        &format!("T{}", num_trams),
                        route.clone(),
                        driver,
                        0.4 + i * 0.03,
                        0.8 + i * 0.05,
                    )
                }
            };
            vehicles.push(vehicle.with_activation_time(i * ACTIVATION_STAGGER_S));
        }
        routes.push(route);
    }
    (routes, vehicles)
}
