//! Bare-hand pointer control from camera hand landmarks.
//!
//! Turns a stream of 21-point hand landmarks into a smoothed, sensitivity-scaled cursor,
//! pinch clicks, magnetic snapping onto interactive elements, and fist-driven panel drags.
//! [`pipeline::FrameScheduler`] is the entry point: call [`pipeline::FrameScheduler::tick`]
//! once per displayed frame.

pub mod click;
pub mod config;
pub mod cursor;
pub mod drag;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod pipeline;
pub mod snap;
pub mod surface;
pub mod synthetic;
pub mod types;

pub use config::{TrackingConfig, TrackingControls};
pub use engine::{CursorOverlay, InteractionEngine, InteractionEvent, UiContext};
pub use error::{ConfigError, TrackingError};
pub use pipeline::{FrameScheduler, LandmarkSource, TickOutcome, TrackingStatus};
