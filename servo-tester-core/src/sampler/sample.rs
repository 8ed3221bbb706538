//! Position samples
//!
//! The tester keeps only the 8 most significant bits of each conversion.

/// 8-bit potentiometer position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogSample(u8);

impl AnalogSample {
    /// Wiper at ground
    pub const MIN: Self = Self(0);
    /// Wiper at Vcc
    pub const MAX: Self = Self(u8::MAX);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Reduce a raw conversion of `resolution_bits` to its top 8 bits
    ///
    /// Readings above the converter's full scale saturate at [`Self::MAX`].
    pub fn from_raw(raw: u16, resolution_bits: u8) -> Self {
        let shift = resolution_bits.saturating_sub(8).min(15);
        let value = (raw >> shift).min(u16::from(u8::MAX));
        Self(value as u8)
    }
}

impl From<u8> for AnalogSample {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
