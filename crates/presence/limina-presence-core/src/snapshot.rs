//! Serializable view of the scheduler's stack.
//!
//! The snapshot carries phase and existence per instance but not the host
//! values themselves, so it serializes regardless of the value type. Hosts
//! use it for introspection and tests use it for determinism comparisons.

use serde::{Deserialize, Serialize};

use crate::ids::{InstanceId, ViewHandle};
use crate::phase::Phase;

/// One stack entry as seen from outside.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub id: InstanceId,
    pub phase: Phase,
    pub existence: f32,
    pub view: ViewHandle,
}

/// Snapshot of the whole stack in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    #[serde(default)]
    pub instances: Vec<InstanceSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<InstanceId>,
}

impl PresenceSnapshot {
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The entry designated current, if any.
    pub fn current_instance(&self) -> Option<&InstanceSnapshot> {
        let id = self.current?;
        self.instances.iter().find(|inst| inst.id == id)
    }
}
