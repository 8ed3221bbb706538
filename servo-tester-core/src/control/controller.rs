//! Mode controller
//!
//! Decides, once per loop iteration, what pulse width the servo gets:
//!
//! - Entering Center writes the center width once. While the switch stays
//!   in Center nothing more is written, so the servo is left where it is.
//! - Manual rescales the latest sample and writes it every iteration,
//!   whether or not the sample changed, because the sampler updates it
//!   behind the loop's back.
//!
//! The switch is not debounced and only the edge into Center is tracked;
//! Manual re-asserts itself every iteration anyway.

use crate::config::ServoConfig;
use crate::pwm::PulseWidth;
use crate::sampler::{AnalogSample, SampleCell};
use crate::traits::{PulseOutput, SwitchInput};

use super::mode::SwitchMode;

/// What one iteration does to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Leave the compare register untouched
    Hold,
    /// Write a new compare value
    Write(PulseWidth),
}

/// Summary of one [`ModeController::poll`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Iteration {
    /// Mode read from the switch
    pub mode: SwitchMode,
    /// Mode differs from the previous iteration
    pub mode_changed: bool,
    /// Action taken
    pub command: Command,
}

/// Center/Manual decision logic and its one piece of state
#[derive(Debug, Clone)]
pub struct ModeController {
    servo: ServoConfig,
    /// Mode seen on the previous iteration
    previous: SwitchMode,
}

impl ModeController {
    /// Create a controller
    ///
    /// The previous mode starts as Manual, so a switch already in Center on
    /// the first iteration still produces one center write.
    pub const fn new(servo: ServoConfig) -> Self {
        Self {
            servo,
            previous: SwitchMode::Manual,
        }
    }

    /// Pulse limits in use
    pub fn servo(&self) -> &ServoConfig {
        &self.servo
    }

    /// Mode seen on the previous iteration
    pub fn previous(&self) -> SwitchMode {
        self.previous
    }

    /// Core decision for one iteration
    pub fn step(&mut self, mode: SwitchMode, sample: AnalogSample) -> Command {
        let command = match mode {
            SwitchMode::Center if self.previous != SwitchMode::Center => {
                Command::Write(PulseWidth::center(&self.servo))
            }
            SwitchMode::Center => Command::Hold,
            SwitchMode::Manual => Command::Write(PulseWidth::from_sample(sample, &self.servo)),
        };

        self.previous = mode;
        command
    }

    /// Run one loop iteration against real (or simulated) hardware
    ///
    /// Reads the switch, snapshots the sample cell, and writes the output
    /// if the decision calls for it. Never blocks.
    pub fn poll<S, O>(&mut self, switch: &mut S, samples: &SampleCell, output: &mut O) -> Iteration
    where
        S: SwitchInput,
        O: PulseOutput,
    {
        let mode = SwitchMode::from_level(switch.is_high());
        let mode_changed = mode != self.previous;
        let command = self.step(mode, samples.latest());

        if let Command::Write(pulse) = command {
            output.set_pulse(pulse);
        }

        Iteration {
            mode,
            mode_changed,
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PWM_CENTER, PWM_HIGH, PWM_LOW};
    use crate::traits::FixedLevel;
    use proptest::prelude::*;

    /// Output that counts writes
    struct Recorder {
        pulse: PulseWidth,
        writes: u32,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                pulse: PulseWidth::center(&ServoConfig::DEFAULT),
                writes: 0,
            }
        }
    }

    impl PulseOutput for Recorder {
        fn set_pulse(&mut self, pulse: PulseWidth) {
            self.pulse = pulse;
            self.writes += 1;
        }

        fn pulse(&self) -> PulseWidth {
            self.pulse
        }
    }

    #[test]
    fn test_manual_scenarios() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);

        for (sample, expected) in [(0u8, PWM_LOW), (255, PWM_HIGH), (128, 184)] {
            samples.publish(AnalogSample::new(sample));
            controller.poll(&mut FixedLevel(false), &samples, &mut output);
            assert_eq!(output.pulse().ticks(), expected, "sample {sample}");
        }
    }

    #[test]
    fn test_manual_writes_every_iteration() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);
        samples.publish(AnalogSample::new(42));

        for _ in 0..5 {
            let iteration = controller.poll(&mut FixedLevel(false), &samples, &mut output);
            assert!(matches!(iteration.command, Command::Write(_)));
        }
        assert_eq!(output.writes, 5);
    }

    #[test]
    fn test_center_is_written_once() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);

        let first = controller.poll(&mut FixedLevel(true), &samples, &mut output);
        assert_eq!(
            first.command,
            Command::Write(PulseWidth::center(&ServoConfig::DEFAULT))
        );
        assert!(first.mode_changed);

        for _ in 0..10 {
            let iteration = controller.poll(&mut FixedLevel(true), &samples, &mut output);
            assert_eq!(iteration.command, Command::Hold);
            assert!(!iteration.mode_changed);
        }
        assert_eq!(output.writes, 1);
        assert_eq!(output.pulse().ticks(), PWM_CENTER);
    }

    #[test]
    fn test_center_ignores_sample_changes() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);

        controller.poll(&mut FixedLevel(true), &samples, &mut output);
        for s in [0u8, 17, 255, 99] {
            samples.publish(AnalogSample::new(s));
            controller.poll(&mut FixedLevel(true), &samples, &mut output);
            assert_eq!(output.pulse().ticks(), PWM_CENTER);
        }
    }

    #[test]
    fn test_manual_to_center_recenters_next_iteration() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);
        samples.publish(AnalogSample::MAX);

        controller.poll(&mut FixedLevel(false), &samples, &mut output);
        assert_eq!(output.pulse().ticks(), PWM_HIGH);

        let iteration = controller.poll(&mut FixedLevel(true), &samples, &mut output);
        assert!(iteration.mode_changed);
        assert_eq!(output.pulse().ticks(), PWM_CENTER);
    }

    #[test]
    fn test_center_to_manual_resumes_tracking() {
        let samples = SampleCell::new();
        let mut output = Recorder::new();
        let mut controller = ModeController::new(ServoConfig::DEFAULT);

        controller.poll(&mut FixedLevel(true), &samples, &mut output);
        samples.publish(AnalogSample::MIN);

        let iteration = controller.poll(&mut FixedLevel(false), &samples, &mut output);
        assert_eq!(iteration.mode, SwitchMode::Manual);
        assert!(iteration.mode_changed);
        assert_eq!(output.pulse().ticks(), PWM_LOW);

        samples.publish(AnalogSample::MAX);
        controller.poll(&mut FixedLevel(false), &samples, &mut output);
        assert_eq!(output.pulse().ticks(), PWM_HIGH);
    }

    #[test]
    fn test_step_tracks_previous_mode() {
        let mut controller = ModeController::new(ServoConfig::DEFAULT);
        assert_eq!(controller.previous(), SwitchMode::Manual);

        controller.step(SwitchMode::Center, AnalogSample::MIN);
        assert_eq!(controller.previous(), SwitchMode::Center);

        controller.step(SwitchMode::Manual, AnalogSample::MIN);
        assert_eq!(controller.previous(), SwitchMode::Manual);
    }

    proptest! {
        #[test]
        fn prop_output_always_in_limits(
            steps in prop::collection::vec((any::<bool>(), any::<u8>()), 1..64)
        ) {
            let servo = ServoConfig::DEFAULT;
            let samples = SampleCell::new();
            let mut output = Recorder::new();
            let mut controller = ModeController::new(servo);
            let mut previous = SwitchMode::Manual;

            for (level, sample) in steps {
                samples.publish(AnalogSample::new(sample));
                let iteration = controller.poll(&mut FixedLevel(level), &samples, &mut output);

                prop_assert!(servo.contains(output.pulse().ticks()));
                match iteration.mode {
                    SwitchMode::Manual => {
                        prop_assert_eq!(
                            output.pulse(),
                            PulseWidth::from_sample(AnalogSample::new(sample), &servo)
                        );
                    }
                    SwitchMode::Center => {
                        prop_assert_eq!(output.pulse().ticks(), PWM_CENTER);
                        let expect_write = previous != SwitchMode::Center;
                        prop_assert_eq!(
                            matches!(iteration.command, Command::Write(_)),
                            expect_write
                        );
                    }
                }
                previous = iteration.mode;
            }
        }
    }
}
