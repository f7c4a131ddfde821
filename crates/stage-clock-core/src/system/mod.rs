//! Platform seams: where the engine's inputs come from and where fullscreen
//! transitions go.

pub mod presenter;
pub mod timing;

pub use presenter::Presenter;
pub use timing::{SystemTime, TimeSample, TimeSource};
