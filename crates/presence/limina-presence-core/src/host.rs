//! Host capability traits.
//!
//! The scheduler never touches the render tree or the frame loop itself;
//! the embedding host supplies these capabilities at construction and the
//! scheduler calls back into them. Tests supply deterministic fakes, which
//! is what keeps the tick algorithm testable without a real frame loop.

use crate::ids::{FrameToken, ViewHandle};

/// Frame-scheduling capability. Optional: a host without one forces the
/// synchronous operating mode (instances appear and disappear instantly).
///
/// `request_frame` registers interest in one future frame and returns a
/// host-minted token; when that frame fires, the host invokes
/// [`PresenceScheduler::tick`](crate::PresenceScheduler::tick) with its
/// clock value. `cancel_frame` withdraws a registration that has not fired.
pub trait FrameDriver {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// View-materialization capability. `create_view` is invoked once when an
/// instance joins the stack and `destroy_view` exactly once when it is
/// removed; the handle is the host's own.
pub trait ViewHost<V> {
    fn create_view(&mut self, value: &V) -> ViewHandle;
    fn destroy_view(&mut self, view: ViewHandle);
}

/// Re-render notification capability, invoked after each tick and after
/// each synchronous mutation so the host re-reads existence and phase.
pub trait ChangeListener {
    fn presence_changed(&mut self);
}
