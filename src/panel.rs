//! Text version of the info panel drawn next to the track.

use crate::{
    simulation::VehicleView,
    vehicle::{Direction, VehicleState},
};

fn direction_arrow(direction: Direction) -> char {
    match direction {
        Direction::Forward => '>',
        Direction::Backward => '<',
    }
}

/// One line per vehicle in service: id, type, line, driver, state, condition,
/// heading and hours driven.
pub fn render<'a>(views: impl IntoIterator<Item = VehicleView<'a>>) -> String {
    let mut panel = String::new();
    for view in views {
        let state = match view.state {
            VehicleState::Active => "OK",
            VehicleState::Broken => "BROKEN",
        };
        panel.push_str(&format!(
            "{:<4} {:<4} line {:<3} {:<18} {:<6} {:>2}/10 {} x={:.0} {:.2}h\n",
            view.id,
            view.vehicle_type,
            view.line,
            view.driver_name,
            state,
            view.condition,
            direction_arrow(view.direction),
            view.x,
            view.hours_driven
        ));
    }
    panel
}
