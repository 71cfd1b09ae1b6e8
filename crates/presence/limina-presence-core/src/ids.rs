//! Identifiers for scheduler entities and host-minted resources.

use serde::{Deserialize, Serialize};

/// Dense identifier for an instance in the stack. Allocated by the
/// scheduler; opaque externally.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

/// Handle to a rendered view, minted by the host's `create_view`. The
/// scheduler stores it and hands it back on teardown, nothing more.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ViewHandle(pub u64);

/// Receipt for one outstanding frame-callback registration, minted by the
/// frame driver and required to cancel it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FrameToken(pub u64);

/// Monotonic allocator for InstanceId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_instance: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_instance(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance = self.next_instance.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_instance(), InstanceId(0));
        assert_eq!(alloc.alloc_instance(), InstanceId(1));
        assert_eq!(alloc.alloc_instance(), InstanceId(2));
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut alloc = IdAllocator::new();
        alloc.alloc_instance();
        alloc.alloc_instance();
        alloc.reset();
        assert_eq!(alloc.alloc_instance(), InstanceId(0));
    }
}
