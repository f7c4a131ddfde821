//! Timing engine for the stage clock.
//!
//! The engine is a pure state machine: every operation takes the current
//! time as an argument, and periodic ticks are delivered by whoever owns the
//! engine (see [`engine::TickSource`]). Platform concerns (reading the clock,
//! entering fullscreen) sit behind the traits in [`system`].

pub mod config;
pub mod countdown;
pub mod customizer;
pub mod engine;
pub mod error;
pub mod format;
pub mod fullscreen;
pub mod mode;
pub mod settings;
pub mod stopwatch;
pub mod system;
pub mod timer;
pub mod timezone;

pub use config::StageClockConfig;
pub use customizer::Customizer;
pub use engine::{ClockEngine, Command, Control, Display, EngineEvent, TickSource};
pub use error::ClockError;
pub use fullscreen::{FullscreenAction, FullscreenController, Key};
pub use mode::Mode;
pub use settings::{BackgroundImage, ClockSettings, FontFamily, Rgb};
pub use system::{Presenter, SystemTime, TimeSample, TimeSource};
pub use timezone::DisplayZone;
