use std::{
    thread,
    time::{Duration, Instant},
};

/// Caps a real-time loop at a target frame rate.
pub struct FrameClock {
    frame_budget: Duration,
    last_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        FrameClock {
            frame_budget: Duration::from_secs(1) / fps.max(1),
            last_tick: None,
        }
    }

    /// Length of one frame in milliseconds.
    pub fn frame_ms(&self) -> f64 {
        self.frame_budget.as_secs_f64() * 1000.0
    }

    /// Sleeps away what is left of the current frame and returns the milliseconds
    /// since the previous tick. The first tick returns 0.
    pub fn tick(&mut self) -> f64 {
        let Some(last_tick) = self.last_tick else {
            self.last_tick = Some(Instant::now());
            return 0.0;
        };
        let spent = last_tick.elapsed();
        if spent < self.frame_budget {
            thread::sleep(self.frame_budget - spent);
        }
        let now = Instant::now();
        self.last_tick = Some(now);
        (now - last_tick).as_secs_f64() * 1000.0
    }
}
