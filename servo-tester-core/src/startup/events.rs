//! Events that advance the startup sequence

/// Startup milestones, in the order they must happen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupEvent {
    /// Interrupts masked, reset flags cleared, watchdog stopped
    Secured,
    /// PWM timer running with the center compare value
    OutputCentered,
    /// Interrupts unmasked, conversions running
    SamplingStarted,
    /// Settling delay started
    SettleStarted,
    /// Settling delay over
    SettleElapsed,
    /// Hardware reset (any source)
    Reset,
}

impl StartupEvent {
    /// Check if this event restarts the sequence
    pub fn is_reset(&self) -> bool {
        matches!(self, StartupEvent::Reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_event() {
        assert!(StartupEvent::Reset.is_reset());
        assert!(!StartupEvent::Secured.is_reset());
        assert!(!StartupEvent::SettleElapsed.is_reset());
    }
}
