//! Inter-task communication
//!
//! Defines the statics shared between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use servo_tester_core::control::SwitchMode;
use servo_tester_core::sampler::SampleCell;

/// Latest potentiometer conversion (written by sampler task, read by controller)
///
/// A single byte, so the controller always sees a whole sample without
/// taking a lock.
pub static SAMPLE: SampleCell = SampleCell::new();

/// Mode change notification (signalled by controller, consumed by status task)
pub static MODE_CHANGED: Signal<CriticalSectionRawMutex, SwitchMode> = Signal::new();
