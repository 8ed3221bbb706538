//! Startup phase machine
//!
//! The order is fixed: secure the chip, start the PWM at center, only then
//! enable interrupts and sampling, hold center for the settling delay, and
//! finally hand over to the control loop. An event that arrives out of
//! order leaves the phase unchanged.

use super::events::StartupEvent;

/// Startup phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Just out of reset; nothing configured
    #[default]
    Reset,
    /// Interrupts masked and watchdog disabled
    Secured,
    /// Output is producing center pulses
    OutputCentered,
    /// Interrupts enabled, conversions running
    Sampling,
    /// Holding center while the servo settles
    Settling,
    /// Control loop running
    Running,
}

impl Phase {
    /// Check if the PWM output is configured and producing valid pulses
    pub fn output_driven(&self) -> bool {
        matches!(
            self,
            Phase::OutputCentered | Phase::Sampling | Phase::Settling | Phase::Running
        )
    }

    /// Check if interrupts (and thus the sampler) may run
    pub fn interrupts_allowed(&self) -> bool {
        matches!(self, Phase::Sampling | Phase::Settling | Phase::Running)
    }

    /// Check if the mode controller may touch the output
    pub fn controller_allowed(&self) -> bool {
        matches!(self, Phase::Running)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: StartupEvent) -> Self {
        match (self, event) {
            (_, event) if event.is_reset() => Phase::Reset,
            (Phase::Reset, StartupEvent::Secured) => Phase::Secured,
            (Phase::Secured, StartupEvent::OutputCentered) => Phase::OutputCentered,
            (Phase::OutputCentered, StartupEvent::SamplingStarted) => Phase::Sampling,
            (Phase::Sampling, StartupEvent::SettleStarted) => Phase::Settling,
            (Phase::Settling, StartupEvent::SettleElapsed) => Phase::Running,

            // Anything else is out of order
            _ => self,
        }
    }
}
