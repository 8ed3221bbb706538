//! Mode indicator task
//!
//! Mirrors the switch mode on the on-board LED: lit in Manual, dark in
//! Center.

use defmt::*;
use embassy_rp::gpio::Output;

use servo_tester_core::control::SwitchMode;

use crate::channels::MODE_CHANGED;

#[embassy_executor::task]
pub async fn status_task(mut led: Output<'static>) {
    info!("Status task started");

    loop {
        let mode = MODE_CHANGED.wait().await;

        match mode {
            SwitchMode::Manual => led.set_high(),
            SwitchMode::Center => led.set_low(),
        }

        debug!("Mode: {:?}", mode);
    }
}
