//! Startup sequence
//!
//! Explicit, ordered bring-up from reset to the running control loop.

pub mod events;
pub mod machine;

pub use events::StartupEvent;
pub use machine::Phase;
