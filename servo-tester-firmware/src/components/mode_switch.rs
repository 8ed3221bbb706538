//! Center/Manual switch input

use embedded_hal::digital::InputPin;

use servo_tester_core::traits::SwitchInput;

/// Switch on a pulled-up input: open (high) is Center, closed is Manual
pub struct ModeSwitch<P> {
    pin: P,
}

impl<P: InputPin> ModeSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> SwitchInput for ModeSwitch<P> {
    fn is_high(&mut self) -> bool {
        // A failed read counts as Center
        self.pin.is_high().unwrap_or(true)
    }
}
