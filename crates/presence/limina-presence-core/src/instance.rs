//! A stack entry: one rendered occurrence of a host value.

use crate::ids::{InstanceId, ViewHandle};
use crate::options::PresenceOptions;
use crate::phase::Phase;

/// Normalized progress for a phase: `elapsed / duration` clamped to [0, 1].
/// Non-positive durations count as already complete, so a zero-duration
/// phase jumps to its boundary on the first tick.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
    }
}

/// One rendered occurrence of a host value.
///
/// The scheduler owns these in stack (insertion) order. `options` is the
/// snapshot captured at creation; later `configure` calls never touch it.
#[derive(Debug)]
pub struct Instance<V> {
    pub id: InstanceId,
    pub value: V,
    pub phase: Phase,
    /// Presence in [0, 1]; 1.0 is fully present.
    pub existence: f32,
    /// When the current phase's animation began; `None` until the first
    /// tick of that phase stamps it.
    pub started_at: Option<f64>,
    pub options: PresenceOptions,
    pub view: ViewHandle,
}

impl<V> Instance<V> {
    /// New instance animating in from nothing.
    pub fn new_entering(
        id: InstanceId,
        value: V,
        options: PresenceOptions,
        view: ViewHandle,
    ) -> Self {
        Self {
            id,
            value,
            phase: Phase::Entering,
            existence: 0.0,
            started_at: None,
            options,
            view,
        }
    }

    /// New instance created fully present (the driver-less operating mode).
    pub fn new_present(
        id: InstanceId,
        value: V,
        options: PresenceOptions,
        view: ViewHandle,
    ) -> Self {
        Self {
            id,
            value,
            phase: Phase::Present,
            existence: 1.0,
            started_at: None,
            options,
            view,
        }
    }

    /// Start a full leave animation from existence = 1. The cleared
    /// `started_at` is stamped on the next tick.
    #[inline]
    pub fn begin_leaving(&mut self) {
        self.phase = Phase::Leaving;
        self.started_at = None;
    }

    /// Mark an entering instance for reversal; the next tick converts it to
    /// `Leaving` with a back-dated start so existence continues from its
    /// current value.
    #[inline]
    pub fn begin_reversing(&mut self) {
        self.phase = Phase::Reversing;
        self.started_at = None;
    }

    /// Synthetic leave start time that makes the leave formula yield the
    /// current existence at `now_ms`.
    #[inline]
    pub fn reversal_start(&self, now_ms: f64) -> f64 {
        now_ms - self.options.leave_ms * f64::from(1.0 - self.existence)
    }
}
