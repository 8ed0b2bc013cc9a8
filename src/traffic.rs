use serde::Deserialize;

/// Time of day a line's traffic was observed at. Informational only.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimePeriod {
    Morning,
    Midday,
    Afternoon,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traffic {
    intensity: u32,
    period: TimePeriod,
}

impl Traffic {
    pub fn new(intensity: u32, period: TimePeriod) -> Self {
        Traffic { intensity, period }
    }

    pub fn intensity(&self) -> u32 {
        self.intensity
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    /// Throttle applied to vehicle speed: $ 1 + intensity / 10 $
    pub fn delay_factor(&self) -> f64 {
        1.0 + self.intensity as f64 / 10.0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_delay_factor() {
        assert_relative_eq!(Traffic::new(0, TimePeriod::Morning).delay_factor(), 1.0);
        assert_relative_eq!(Traffic::new(4, TimePeriod::Morning).delay_factor(), 1.4);
        assert_relative_eq!(Traffic::new(15, TimePeriod::Evening).delay_factor(), 2.5);
    }

    #[test]
    fn test_delay_factor_is_monotonic() {
        let factors = (0..20)
            .map(|intensity| Traffic::new(intensity, TimePeriod::Midday).delay_factor())
            .collect::<Vec<_>>();
        assert!(factors.windows(2).all(|w| w[0] < w[1]));
    }
}
