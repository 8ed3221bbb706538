//! Potentiometer sampling task
//!
//! Runs one conversion at a time on a fixed interval, independent of the
//! control loop. Each completion raises ADC_IRQ_FIFO, which wakes this
//! task; the result is reduced to 8 bits and published to the sample cell.
//!
//! The interval stands in for a free-running converter: the RP2040 ADC
//! only free-runs into its FIFO, so conversions are re-armed here instead.
//! At the default 500us the controller sees a sample at most one interval
//! old, well inside a 20ms frame.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use servo_tester_core::config::TesterConfig;
use servo_tester_core::sampler::AnalogSample;

use crate::channels::SAMPLE;

/// RP2040 ADC resolution
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// Sample the potentiometer forever
///
/// A failed conversion is logged and the previous sample stays in the cell.
#[embassy_executor::task]
pub async fn sampler_task(
    mut adc: Adc<'static, Async>,
    mut pot: Channel<'static>,
    config: &'static TesterConfig,
) {
    info!("Sampler task started ({}us interval)", config.sample_interval_us);

    let mut ticker = Ticker::every(Duration::from_micros(config.sample_interval_us as u64));

    loop {
        match adc.read(&mut pot).await {
            Ok(raw) => SAMPLE.publish(AnalogSample::from_raw(raw, ADC_RESOLUTION_BITS)),
            Err(e) => warn!("ADC conversion failed: {:?}", Debug2Format(&e)),
        }

        ticker.next().await;
    }
}
