//! Limina Presence Core (host-agnostic)
//!
//! Lifecycle scheduling for UI element instances: each value handed to the
//! scheduler gets an instance that animates in, sits fully present, and
//! animates out when displaced, with overlapping enter/leave transitions
//! tracked on one ordered stack. Frame timing, view materialization, and
//! re-render notification are host capabilities injected at construction,
//! so the whole tick algorithm runs deterministically under a fake clock.

pub mod error;
pub mod host;
pub mod ids;
pub mod instance;
pub mod options;
pub mod phase;
pub mod scheduler;
pub mod snapshot;

// Re-exports for consumers (adapters)
pub use error::PresenceError;
pub use host::{ChangeListener, FrameDriver, ViewHost};
pub use ids::{FrameToken, InstanceId, ViewHandle};
pub use instance::Instance;
pub use options::{parse_options_json, OptionsDoc, PresenceOptions, TimingsDoc};
pub use phase::Phase;
pub use scheduler::PresenceScheduler;
pub use snapshot::{InstanceSnapshot, PresenceSnapshot};

/// Result type alias for the options-document surface.
pub type Result<T> = core::result::Result<T, PresenceError>;
