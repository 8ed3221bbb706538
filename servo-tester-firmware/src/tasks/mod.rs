//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod controller;
pub mod sampler;
pub mod status;

pub use controller::controller_task;
pub use sampler::sampler_task;
pub use status::status_task;
