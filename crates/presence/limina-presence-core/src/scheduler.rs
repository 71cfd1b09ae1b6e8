//! Scheduler: stack ownership and the public API for enter/leave transitions.
//!
//! Methods:
//! - new / without_driver, set_value, configure / configure_json, tick,
//!   dispose, plus read accessors and snapshot()

use log::{debug, warn};

use crate::host::{ChangeListener, FrameDriver, ViewHost};
use crate::ids::{FrameToken, IdAllocator, InstanceId};
use crate::instance::{progress, Instance};
use crate::options::{parse_options_json, PresenceOptions};
use crate::phase::Phase;
use crate::snapshot::{InstanceSnapshot, PresenceSnapshot};

/// Per-instance lifecycle scheduler.
///
/// Owns the ordered stack of instances, designates at most one of them as
/// current, and drives progress from host frame callbacks. The host
/// capabilities are injected at construction; without a frame driver the
/// scheduler runs in the synchronous mode where instances appear and
/// disappear instantly.
pub struct PresenceScheduler<V> {
    // Owned state
    options: PresenceOptions,
    ids: IdAllocator,
    stack: Vec<Instance<V>>,
    current: Option<InstanceId>,
    pending_frame: Option<FrameToken>,
    legacy_option_warned: bool,

    // Host capabilities
    views: Box<dyn ViewHost<V>>,
    changes: Box<dyn ChangeListener>,
    frames: Option<Box<dyn FrameDriver>>,
}

impl<V> PresenceScheduler<V> {
    /// Create a scheduler with the given options and host capabilities.
    pub fn new(
        options: PresenceOptions,
        views: Box<dyn ViewHost<V>>,
        changes: Box<dyn ChangeListener>,
        frames: Option<Box<dyn FrameDriver>>,
    ) -> Self {
        Self {
            options: options.normalized(),
            ids: IdAllocator::new(),
            stack: Vec::new(),
            current: None,
            pending_frame: None,
            legacy_option_warned: false,
            views,
            changes,
            frames,
        }
    }

    /// Create a scheduler for a host without a frame driver. Every
    /// transition is instant: new values appear fully present and retired
    /// instances tear down synchronously.
    pub fn without_driver(
        options: PresenceOptions,
        views: Box<dyn ViewHost<V>>,
        changes: Box<dyn ChangeListener>,
    ) -> Self {
        Self::new(options, views, changes, None)
    }

    /// Accept the next value to display.
    ///
    /// `Some(v)` identity-equal to the current instance's value is a no-op.
    /// `None` retires the current instance and leaves none current. Any
    /// other value retires the current instance and creates a new one at
    /// the end of the stack.
    pub fn set_value(&mut self, value: Option<V>)
    where
        V: PartialEq,
    {
        match value {
            Some(v) => {
                if let Some(cur) = self.current_instance() {
                    if cur.value == v {
                        return;
                    }
                }
                self.retire_current();
                self.create_instance(v);
            }
            None => {
                if self.current.is_none() {
                    return;
                }
                self.retire_current();
            }
        }
        self.changes.presence_changed();
        self.schedule_if_needed();
    }

    /// Set the options captured by instances created after this call.
    /// In-flight instances keep the snapshot they were created with.
    pub fn configure(&mut self, options: PresenceOptions) {
        self.options = options.normalized();
    }

    /// Parse and apply a host-supplied JSON options document. Deprecated
    /// keys still take effect but draw a one-time advisory.
    pub fn configure_json(&mut self, doc: &str) -> crate::Result<()> {
        let doc = parse_options_json(doc)?;
        let (options, legacy) = doc.resolve();
        if legacy && !self.legacy_option_warned {
            self.legacy_option_warned = true;
            warn!("options key \"duration\" is deprecated; use timings.enter / timings.leave");
        }
        self.options = options;
        Ok(())
    }

    /// Advance every instance against the host clock (milliseconds,
    /// monotonically increasing). The host invokes this when a frame
    /// requested through the driver fires.
    pub fn tick(&mut self, now_ms: f64) {
        // 1) The registration that fired is consumed.
        self.pending_frame = None;

        let mut needs_tick = false;
        let mut removals: Vec<InstanceId> = Vec::new();

        // 2) Advance each instance in stack order.
        for inst in &mut self.stack {
            // a) Stamp the phase start on its first tick.
            if inst.phase.is_animating() && inst.started_at.is_none() {
                inst.started_at = Some(now_ms);
            }
            // b) A reversal becomes a leave whose start is back-dated so
            //    existence continues from its current value.
            if inst.phase == Phase::Reversing {
                inst.started_at = Some(inst.reversal_start(now_ms));
                inst.phase = Phase::Leaving;
            }
            // c) Negative elapsed from clock jitter clamps to zero; the
            //    progress formulas assume a monotonic clock.
            let elapsed = (now_ms - inst.started_at.unwrap_or(now_ms)).max(0.0);
            match inst.phase {
                // d) Climb toward full presence, then settle or hand over
                //    to the leave animation if superseded meanwhile.
                Phase::Entering => {
                    inst.existence = progress(elapsed, inst.options.enter_ms);
                    if inst.existence >= 1.0 {
                        inst.started_at = None;
                        if self.current == Some(inst.id) {
                            inst.phase = Phase::Present;
                        } else {
                            inst.phase = Phase::Leaving;
                            needs_tick = true;
                        }
                    } else {
                        needs_tick = true;
                    }
                }
                // e) Fall toward zero, then reap.
                Phase::Leaving => {
                    inst.existence = 1.0 - progress(elapsed, inst.options.leave_ms);
                    if inst.existence <= 0.0 {
                        removals.push(inst.id);
                    } else {
                        needs_tick = true;
                    }
                }
                // f) Present instances are untouched; Reversing was
                //    converted in step b.
                Phase::Present | Phase::Reversing => {}
            }
        }

        // 3) Reap in stack order, delegating view teardown to the host.
        self.remove_instances(&removals);

        // 4) Host re-reads existence/phase.
        self.changes.presence_changed();

        // 5) Keep the loop alive while anything still animates.
        if needs_tick {
            self.schedule_if_needed();
        }
    }

    /// Cancel any pending frame registration and tear down every instance
    /// immediately, one view-destruction callback each.
    pub fn dispose(&mut self) {
        if let Some(token) = self.pending_frame.take() {
            if let Some(driver) = self.frames.as_mut() {
                driver.cancel_frame(token);
            }
        }
        debug!("disposing {} instance(s)", self.stack.len());
        for inst in self.stack.drain(..) {
            self.views.destroy_view(inst.view);
        }
        self.current = None;
    }

    /// Instances in stack (insertion) order.
    #[inline]
    pub fn instances(&self) -> &[Instance<V>] {
        &self.stack
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Identifier of the current instance, if any.
    #[inline]
    pub fn current_id(&self) -> Option<InstanceId> {
        self.current
    }

    /// Value of the current instance, if any.
    pub fn current_value(&self) -> Option<&V> {
        self.current_instance().map(|inst| &inst.value)
    }

    /// Check if a frame registration is outstanding.
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Check if a frame driver capability was supplied.
    #[inline]
    pub fn has_frame_driver(&self) -> bool {
        self.frames.is_some()
    }

    /// Check if every instance has settled (no further ticks required).
    pub fn is_settled(&self) -> bool {
        self.stack.iter().all(|inst| inst.phase.is_settled())
    }

    /// The options future instances will capture.
    #[inline]
    pub fn options(&self) -> &PresenceOptions {
        &self.options
    }

    /// Serializable view of the stack for host introspection.
    pub fn snapshot(&self) -> PresenceSnapshot {
        PresenceSnapshot {
            instances: self
                .stack
                .iter()
                .map(|inst| InstanceSnapshot {
                    id: inst.id,
                    phase: inst.phase,
                    existence: inst.existence,
                    view: inst.view,
                })
                .collect(),
            current: self.current,
        }
    }

    fn current_instance(&self) -> Option<&Instance<V>> {
        let id = self.current?;
        self.stack.iter().find(|inst| inst.id == id)
    }

    /// Apply the retirement policy to the current instance, if any.
    /// Clears the current designation either way.
    fn retire_current(&mut self) {
        let id = match self.current.take() {
            Some(id) => id,
            None => return,
        };
        if self.frames.is_none() {
            // Synchronous teardown in the driver-less operating mode.
            if let Some(idx) = self.stack.iter().position(|inst| inst.id == id) {
                let inst = self.stack.remove(idx);
                debug!("instance {:?} removed (no driver)", inst.id);
                self.views.destroy_view(inst.view);
            }
            return;
        }
        if let Some(inst) = self.stack.iter_mut().find(|inst| inst.id == id) {
            match inst.phase {
                Phase::Present => inst.begin_leaving(),
                Phase::Entering if inst.options.symmetric => inst.begin_reversing(),
                // A non-symmetric entering instance finishes entering
                // first; the tick loop flips it to Leaving at the peak.
                _ => {}
            }
        }
    }

    /// Create an instance for `value` at the end of the stack and make it
    /// current. Without a driver it is born fully present.
    fn create_instance(&mut self, value: V) {
        let id = self.ids.alloc_instance();
        let view = self.views.create_view(&value);
        let inst = if self.frames.is_some() {
            Instance::new_entering(id, value, self.options, view)
        } else {
            Instance::new_present(id, value, self.options, view)
        };
        debug!("instance {:?} created as {}", id, inst.phase.name());
        self.stack.push(inst);
        self.current = Some(id);
    }

    /// Remove the given instances in stack order, one destroy_view each.
    fn remove_instances(&mut self, ids: &[InstanceId]) {
        for id in ids {
            if let Some(idx) = self.stack.iter().position(|inst| inst.id == *id) {
                let inst = self.stack.remove(idx);
                debug!("instance {:?} removed", inst.id);
                self.views.destroy_view(inst.view);
            }
        }
    }

    /// Request a frame iff something still animates and none is pending.
    fn schedule_if_needed(&mut self) {
        if self.pending_frame.is_some() {
            return;
        }
        let driver = match self.frames.as_mut() {
            Some(driver) => driver,
            None => return,
        };
        if self.stack.iter().any(|inst| inst.phase.is_animating()) {
            self.pending_frame = Some(driver.request_frame());
        }
    }
}
