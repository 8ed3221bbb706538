//! Latest-value sample cell
//!
//! Single-producer/single-consumer mailbox holding one [`AnalogSample`].
//! The conversion handler overwrites it, the control loop reads it. There is
//! no queue and no backpressure: a reader always sees the most recently
//! published sample, which may be replaced right after the read.
//!
//! The slot is one byte wide, so every load and store is a single atomic
//! access and a reader can never observe a partially written value.

use portable_atomic::{AtomicU8, Ordering};

use super::sample::AnalogSample;

/// One-slot overwrite-on-write sample register
#[derive(Debug)]
pub struct SampleCell {
    value: AtomicU8,
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleCell {
    /// Create a cell holding [`AnalogSample::MIN`]
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(0),
        }
    }

    /// Replace the stored sample
    pub fn publish(&self, sample: AnalogSample) {
        self.value.store(sample.value(), Ordering::Relaxed);
    }

    /// Snapshot of the latest sample
    pub fn latest(&self) -> AnalogSample {
        AnalogSample::new(self.value.load(Ordering::Relaxed))
    }

    /// Return to the power-on value
    pub fn clear(&self) {
        self.publish(AnalogSample::MIN);
    }
}
