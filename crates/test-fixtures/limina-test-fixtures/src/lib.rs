use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    options: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Shared options documents in the host-facing JSON shape.
pub mod options {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.options.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.options, "options", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.options, "options", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.options, "options", name)?;
        Ok(resolve_path(rel))
    }
}

/// Deterministic host-capability doubles for driving a scheduler by hand.
///
/// Each double keeps its record behind a shared `Rc<RefCell<...>>` handle,
/// so tests clone the handle before boxing the double into the scheduler
/// and inspect it afterwards.
pub mod hosts {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use limina_presence_core::{ChangeListener, FrameDriver, FrameToken, ViewHandle, ViewHost};

    /// Frame driver double. Mints sequential tokens and records requests
    /// and cancellations; the test fires frames by calling the scheduler's
    /// tick with a hand-advanced clock.
    #[derive(Default)]
    pub struct ManualFrameDriver {
        state: Rc<RefCell<DriverState>>,
    }

    /// Record of everything a [`ManualFrameDriver`] was asked to do.
    #[derive(Default, Debug)]
    pub struct DriverState {
        pub next_token: u64,
        pub requested: Vec<FrameToken>,
        pub cancelled: Vec<FrameToken>,
    }

    impl DriverState {
        pub fn request_count(&self) -> usize {
            self.requested.len()
        }

        pub fn cancel_count(&self) -> usize {
            self.cancelled.len()
        }
    }

    impl ManualFrameDriver {
        pub fn new() -> Self {
            Self::default()
        }

        /// Cloneable handle to the request/cancel record.
        pub fn state(&self) -> Rc<RefCell<DriverState>> {
            Rc::clone(&self.state)
        }
    }

    impl FrameDriver for ManualFrameDriver {
        fn request_frame(&mut self) -> FrameToken {
            let mut state = self.state.borrow_mut();
            let token = FrameToken(state.next_token);
            state.next_token += 1;
            state.requested.push(token);
            token
        }

        fn cancel_frame(&mut self, token: FrameToken) {
            self.state.borrow_mut().cancelled.push(token);
        }
    }

    /// One create or destroy call observed by a [`RecordingViewHost`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum ViewEvent<V> {
        Created { view: ViewHandle, value: V },
        Destroyed { view: ViewHandle },
    }

    /// Record of a [`RecordingViewHost`]'s create/destroy traffic.
    #[derive(Debug)]
    pub struct ViewLog<V> {
        pub next_handle: u64,
        pub events: Vec<ViewEvent<V>>,
    }

    impl<V> ViewLog<V> {
        pub fn created_count(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, ViewEvent::Created { .. }))
                .count()
        }

        pub fn destroyed_count(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, ViewEvent::Destroyed { .. }))
                .count()
        }

        /// Views destroyed so far, in callback order.
        pub fn destroyed_views(&self) -> Vec<ViewHandle> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    ViewEvent::Destroyed { view } => Some(*view),
                    _ => None,
                })
                .collect()
        }
    }

    /// View host double. Mints sequential handles and records every
    /// create/destroy call together with the value involved.
    pub struct RecordingViewHost<V> {
        state: Rc<RefCell<ViewLog<V>>>,
    }

    impl<V> RecordingViewHost<V> {
        pub fn new() -> Self {
            Self {
                state: Rc::new(RefCell::new(ViewLog {
                    next_handle: 1,
                    events: Vec::new(),
                })),
            }
        }

        /// Cloneable handle to the create/destroy record.
        pub fn log(&self) -> Rc<RefCell<ViewLog<V>>> {
            Rc::clone(&self.state)
        }
    }

    impl<V> Default for RecordingViewHost<V> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<V: Clone> ViewHost<V> for RecordingViewHost<V> {
        fn create_view(&mut self, value: &V) -> ViewHandle {
            let mut state = self.state.borrow_mut();
            let view = ViewHandle(state.next_handle);
            state.next_handle += 1;
            state.events.push(ViewEvent::Created {
                view,
                value: value.clone(),
            });
            view
        }

        fn destroy_view(&mut self, view: ViewHandle) {
            self.state
                .borrow_mut()
                .events
                .push(ViewEvent::Destroyed { view });
        }
    }

    /// Change listener double counting notifications.
    #[derive(Default)]
    pub struct CountingListener {
        count: Rc<Cell<usize>>,
    }

    impl CountingListener {
        pub fn new() -> Self {
            Self::default()
        }

        /// Cloneable handle to the notification counter.
        pub fn count(&self) -> Rc<Cell<usize>> {
            Rc::clone(&self.count)
        }
    }

    impl ChangeListener for CountingListener {
        fn presence_changed(&mut self) {
            self.count.set(self.count.get() + 1);
        }
    }
}
