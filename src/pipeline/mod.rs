pub mod outbound;
pub mod scheduler;
pub mod source;

// Re-exports for convenience
pub use outbound::{ChannelSink, FrameSink, OutboundThrottle, SinkError};
pub use scheduler::{FrameScheduler, FrameStats, SkipReason, TickOutcome, TrackingStatus};
pub use source::LandmarkSource;
