//! Switch mode
//!
//! The switch input is pulled up, so an open switch reads high.

/// Position of the Center/Manual switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchMode {
    /// Hold the servo at the center pulse width
    Center,
    /// Follow the position potentiometer
    Manual,
}

impl SwitchMode {
    /// Decode the pin level: high (open, pulled up) is Center, low is Manual
    pub const fn from_level(high: bool) -> Self {
        if high {
            SwitchMode::Center
        } else {
            SwitchMode::Manual
        }
    }

    /// Pin level that selects this mode
    pub const fn level(self) -> bool {
        matches!(self, SwitchMode::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_up_polarity() {
        assert_eq!(SwitchMode::from_level(true), SwitchMode::Center);
        assert_eq!(SwitchMode::from_level(false), SwitchMode::Manual);
    }

    #[test]
    fn test_level_round_trip() {
        for mode in [SwitchMode::Center, SwitchMode::Manual] {
            assert_eq!(SwitchMode::from_level(mode.level()), mode);
        }
    }
}
