//! Host simulation bench
//!
//! Runs the three parts of the tester on one virtual tick clock, each on its
//! own schedule:
//!
//! - the PWM generator advances every tick and emits a frame every period
//! - the sampler converts the potentiometer every `sample_interval_us`
//! - the control loop polls every `loop_interval` ticks once running
//!
//! Bring-up goes through the same [`Phase`] sequence as the firmware. Every
//! completed output frame is recorded so tests can check what the servo
//! actually saw.

use heapless::HistoryBuffer;

use crate::config::TesterConfig;
use crate::control::{ModeController, SwitchMode};
use crate::pwm::{PulseWidth, PwmGenerator};
use crate::sampler::{AnalogSample, SampleCell};
use crate::startup::{Phase, StartupEvent};
use crate::traits::{FixedLevel, PulseOutput};

/// Number of recent frames kept
pub const FRAME_HISTORY: usize = 32;

/// Resolution of the simulated converter
pub const ADC_BITS: u8 = 12;

/// Aggregate of all frames recorded since the last [`Bench::clear_stats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub count: u32,
    pub min: u16,
    pub max: u16,
}

/// Simulated servo tester
pub struct Bench {
    config: TesterConfig,
    phase: Phase,
    /// `None` until the output is configured
    generator: Option<PwmGenerator>,
    samples: SampleCell,
    controller: ModeController,
    switch_high: bool,
    pot_raw: u16,
    now: u64,
    settle_left: u32,
    sample_every: u32,
    loop_every: u32,
    iterations: u32,
    history: HistoryBuffer<u16, FRAME_HISTORY>,
    stats: Option<FrameStats>,
}

impl Bench {
    /// Create a powered-off bench with the switch open (Center)
    pub fn new(config: TesterConfig) -> Self {
        let sample_every = config
            .timing
            .micros_to_ticks(config.sample_interval_us)
            .max(1);

        Self {
            config,
            phase: Phase::Reset,
            generator: None,
            samples: SampleCell::new(),
            controller: ModeController::new(config.servo),
            switch_high: true,
            pot_raw: 0,
            now: 0,
            settle_left: 0,
            sample_every,
            loop_every: 1,
            iterations: 0,
            history: HistoryBuffer::new(),
            stats: None,
        }
    }

    /// Poll the control loop every `ticks` ticks instead of every tick
    pub fn with_loop_interval(mut self, ticks: u32) -> Self {
        self.loop_every = ticks.max(1);
        self
    }

    /// Bring the tester up to the settling phase
    pub fn power_on(&mut self) {
        self.samples.clear();
        self.controller = ModeController::new(self.config.servo);
        self.apply(StartupEvent::Secured);

        let center = PulseWidth::center(&self.config.servo);
        self.generator = Some(PwmGenerator::new(self.config.timing, center));
        self.apply(StartupEvent::OutputCentered);

        self.apply(StartupEvent::SamplingStarted);

        self.settle_left = self.config.settle_ticks();
        self.apply(StartupEvent::SettleStarted);
        if self.settle_left == 0 {
            self.apply(StartupEvent::SettleElapsed);
        }
    }

    /// Hardware reset: output stops, volatile state is lost
    pub fn reset(&mut self) {
        self.apply(StartupEvent::Reset);
        self.generator = None;
        self.samples.clear();
        self.settle_left = 0;
    }

    fn apply(&mut self, event: StartupEvent) {
        self.phase = self.phase.transition(event);
    }

    /// Move the Center/Manual switch
    pub fn set_switch(&mut self, mode: SwitchMode) {
        self.switch_high = mode.level();
    }

    /// Set the potentiometer as a raw 12-bit reading
    pub fn set_pot_raw(&mut self, raw: u16) {
        self.pot_raw = raw;
    }

    /// Set the potentiometer so that it converts to `sample`
    pub fn set_pot(&mut self, sample: AnalogSample) {
        self.pot_raw = u16::from(sample.value()) << (ADC_BITS - 8);
    }

    /// Advance one timer tick
    pub fn tick(&mut self) {
        if let Some(generator) = self.generator.as_mut() {
            if let Some(frame) = generator.tick() {
                self.record(frame.high_ticks);
            }
        }

        if self.phase.interrupts_allowed() && self.now % u64::from(self.sample_every) == 0 {
            self.samples
                .publish(AnalogSample::from_raw(self.pot_raw, ADC_BITS));
        }

        match self.phase {
            Phase::Settling => {
                self.settle_left = self.settle_left.saturating_sub(1);
                if self.settle_left == 0 {
                    self.apply(StartupEvent::SettleElapsed);
                }
            }
            Phase::Running if self.now % u64::from(self.loop_every) == 0 => {
                if let Some(generator) = self.generator.as_mut() {
                    let mut switch = FixedLevel(self.switch_high);
                    self.controller.poll(&mut switch, &self.samples, generator);
                    self.iterations += 1;
                }
            }
            _ => {}
        }

        self.now += 1;
    }

    /// Advance `ticks` timer ticks
    pub fn run_ticks(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Advance `frames` whole frame periods
    pub fn run_frames(&mut self, frames: u32) {
        let period = u32::from(self.config.timing.period_ticks());
        self.run_ticks(frames * period);
    }

    /// Advance until the settling delay is over; returns the ticks spent
    pub fn run_until_running(&mut self) -> u64 {
        let start = self.now;
        while self.phase == Phase::Settling {
            self.tick();
        }
        self.now - start
    }

    fn record(&mut self, high_ticks: u16) {
        self.history.write(high_ticks);
        self.stats = Some(match self.stats {
            None => FrameStats {
                count: 1,
                min: high_ticks,
                max: high_ticks,
            },
            Some(s) => FrameStats {
                count: s.count + 1,
                min: s.min.min(high_ticks),
                max: s.max.max(high_ticks),
            },
        });
    }

    /// Current startup phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ticks elapsed since the bench was created
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Control loop iterations run so far
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Latest sample seen by the control loop
    pub fn latest_sample(&self) -> AnalogSample {
        self.samples.latest()
    }

    /// Compare value the next frame will use, if the output is running
    pub fn pending_pulse(&self) -> Option<PulseWidth> {
        self.generator.as_ref().map(|g| g.pulse())
    }

    /// Width of the most recent completed frame
    pub fn last_frame(&self) -> Option<u16> {
        self.history.recent().copied()
    }

    /// Recent frame widths, oldest first
    pub fn recent_frames(&self) -> impl Iterator<Item = u16> + '_ {
        self.history.oldest_ordered().copied()
    }

    /// Aggregate over recorded frames
    pub fn stats(&self) -> Option<FrameStats> {
        self.stats
    }

    /// Forget recorded frames
    pub fn clear_stats(&mut self) {
        self.history.clear();
        self.stats = None;
    }
}
