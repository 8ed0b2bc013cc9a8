#![allow(dead_code)]

use std::fs::File;
use std::process::exit;

use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use log::{debug, error, info, LevelFilter};

use constants::{BASE_FAILURE_CHANCE_PER_SECOND, TARGET_FPS};
use frame_clock::FrameClock;
use maintenance::Maintenance;
use network::{default_lines, load_lines, Line};
use serialization::costs::CostExporter;
use simulation::Simulation;

mod col;
mod constants;
mod cost_tracker;
mod driver;
mod frame_clock;
mod maintenance;
mod network;
mod panel;
mod report;
mod route;
mod serialization;
mod simulation;
mod traffic;
mod vehicle;

#[derive(Parser, Debug)]
#[command(
    version,
    author,
    about = "Simulates buses and trams on a small transit network, including breakdowns and operating costs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    #[command(about = "Run the simulation and export the running costs")]
    Run(RunArgs),

    #[command(about = "Print the static cost of every vehicle of the fleet")]
    Fleet(FleetArgs),
}

#[derive(Args, Clone, Debug)]
struct LinesArgs {
    #[arg(
        long = "lines",
        help = "A ';'-separated CSV file with columns [line, mode, stops, length, intensity, period]. Stops are separated by '|'. If not given, the built-in network is used."
    )]
    lines_path: Option<String>,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    #[arg(
        short = 'd',
        long,
        default_value_t = 120.0,
        help = "The simulated time (in seconds) after which the run stops."
    )]
    duration: f64,

    #[arg(
        short = 'o',
        long,
        default_value = "costs.csv",
        help = "The file the cost rows are appended to every 10 simulated seconds."
    )]
    out_filename: String,

    #[arg(
        long,
        help = "The seed of the random number generator. If not given, a random seed is drawn and logged."
    )]
    seed: Option<u64>,

    #[arg(
        long,
        default_value_t = BASE_FAILURE_CHANCE_PER_SECOND,
        help = "The failure chance per second of a vehicle in perfect condition."
    )]
    failure_chance: f64,

    #[arg(long, default_value_t = TARGET_FPS, help = "The number of ticks per second.")]
    fps: u32,

    #[arg(
        long,
        help = "Pace the ticks with the wall clock instead of using a fixed time step."
    )]
    realtime: bool,

    #[arg(long, help = "Log the vehicle panel at every export.")]
    panel: bool,

    #[clap(flatten)]
    lines_args: LinesArgs,
}

#[derive(Args, Clone, Debug)]
struct FleetArgs {
    #[arg(long, help = "The seed used to draw the driver pool.", default_value_t = 0)]
    seed: u64,

    #[clap(flatten)]
    lines_args: LinesArgs,
}

fn load_network(args: &LinesArgs) -> Vec<Line> {
    let Some(lines_path) = &args.lines_path else {
        return default_lines();
    };
    let file = File::open(lines_path).unwrap_or_else(|it| {
        error!("Could not open lines file {}: {}", lines_path, it);
        exit(1);
    });
    load_lines(file).unwrap_or_else(|it| {
        error!("Could not load lines:\n{:#?}", it);
        exit(1);
    })
}

fn main_run(args: &RunArgs) {
    let lines = load_network(&args.lines_args);
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut sim = Simulation::new(lines, Maintenance::new(args.failure_chance), seed);
    for route in sim.route_views() {
        debug!(
            "Line {}: {}",
            route.line,
            route
                .stops
                .iter()
                .zip(&route.stop_positions)
                .map(|(stop, x)| format!("{}@{}", stop, x))
                .join(", ")
        );
    }

    let mut exporter = CostExporter::open(&args.out_filename).unwrap_or_else(|it| {
        error!("Could not open {}:\n{:#?}", args.out_filename, it);
        exit(1);
    });

    let mut clock = FrameClock::new(args.fps);
    while sim.time_s() < args.duration {
        let elapsed_ms = if args.realtime {
            clock.tick()
        } else {
            clock.frame_ms()
        };
        sim.tick(elapsed_ms);

        let Some(records) = sim.take_due_export() else {
            continue;
        };
        exporter.write(&records).unwrap_or_else(|it| {
            error!("Could not export costs:\n{:#?}", it);
            exit(1);
        });
        if args.panel {
            info!(
                "t = {}s\n{}",
                sim.time_s() as u64,
                panel::render(sim.vehicle_views())
            );
        }
    }

    info!("Simulated {:.1}s", sim.time_s());
    for summary in report::summarize(&sim.cost_records()) {
        info!(
            "{} ({} vehicles): fuel/energy {:.2}, salary {:.2}, repairs {:.2}, total {:.2}",
            summary.vehicle_type,
            summary.vehicles,
            summary.fuel_or_energy_cost,
            summary.salary_cost,
            summary.repair_cost,
            summary.total_cost
        );
    }
}

fn main_fleet(args: &FleetArgs) {
    let lines = load_network(&args.lines_args);
    let sim = Simulation::new(lines, Maintenance::default(), args.seed);
    for vehicle in sim.vehicles() {
        info!(
            "{:<4} line {:<3} ({:?}, delay {:.1}) {:<4} {:<18} speed {:.2}  cost {:.2}",
            vehicle.line,
            vehicle.route.line(),
            vehicle.route.traffic().period(),
            vehicle.route.delay_factor(),
            vehicle.vehicle_type(),
            vehicle.driver.name,
            vehicle.speed,
            vehicle.calculate_cost()
        );
    }
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_env("LOG")
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => main_run(&args),
        Commands::Fleet(args) => main_fleet(&args),
    }
}
