//! Mode controller task
//!
//! Runs the Center/Manual loop as fast as the executor allows. Every
//! iteration reads the switch, snapshots the latest sample and, when the
//! controller asks for it, writes the compare register. Yields between
//! iterations so the sampler and status tasks get to run.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Input;

use servo_tester_core::config::TesterConfig;
use servo_tester_core::control::{Command, Iteration, ModeController};

use crate::channels::{MODE_CHANGED, SAMPLE};
use crate::components::{ModeSwitch, ServoPwm};

/// Control loop task
#[embassy_executor::task]
pub async fn controller_task(
    mut switch: ModeSwitch<Input<'static>>,
    mut output: ServoPwm,
    config: &'static TesterConfig,
) {
    info!("Controller task started");

    let mut controller = ModeController::new(config.servo);

    // Always announce the first mode so the status LED starts out right
    let first = controller.poll(&mut switch, &SAMPLE, &mut output);
    MODE_CHANGED.signal(first.mode);
    log_write(&first);

    loop {
        yield_now().await;

        let iteration = controller.poll(&mut switch, &SAMPLE, &mut output);
        if iteration.mode_changed {
            MODE_CHANGED.signal(iteration.mode);
        }
        log_write(&iteration);
    }
}

fn log_write(iteration: &Iteration) {
    if let Command::Write(pulse) = iteration.command {
        trace!("{:?}: compare {} ticks", iteration.mode, pulse.ticks());
    }
}
