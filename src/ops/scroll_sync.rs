//! Scroll offsets for recycled container slots.
//!
//! A windowed parent reuses its row slots by position. Each slot owns the
//! scroll offset of the nested list it hosts, so when a slot starts hosting a
//! different container (columns reordered, say) the offset it carries belongs
//! to someone else. The guard notices the identity change and resets the slot
//! to the top. Offsets are never remembered per identity.

use std::collections::HashMap;

use tracing::trace;

/// Position of a slot in its parent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(pub usize);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SlotState {
    identity: String,
    logical_index: usize,
    scroll_offset: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSyncGuard {
    slots: HashMap<SlotHandle, SlotState>,
}

impl ScrollSyncGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record which container `handle` hosts this frame.
    ///
    /// Returns true when the identity differs from the previous frame, in
    /// which case the slot's offset has already been reset. A slot seen for
    /// the first time starts at offset 0 and does not count as a change.
    pub fn observe(&mut self, handle: SlotHandle, identity: &str, logical_index: usize) -> bool {
        match self.slots.get_mut(&handle) {
            Some(slot) if slot.identity == identity => {
                slot.logical_index = logical_index;
                false
            }
            Some(slot) => {
                slot.identity = identity.to_string();
                self.on_container_identity_changed(handle, logical_index);
                true
            }
            None => {
                self.slots.insert(
                    handle,
                    SlotState {
                        identity: identity.to_string(),
                        logical_index,
                        scroll_offset: 0,
                    },
                );
                false
            }
        }
    }

    /// The slot now backs a different container: drop its scroll offset.
    pub fn on_container_identity_changed(&mut self, handle: SlotHandle, new_logical_index: usize) {
        let slot = self.slots.entry(handle).or_default();
        trace!(
            slot = handle.0,
            new_logical_index,
            stale_offset = slot.scroll_offset,
            "slot identity changed, scroll reset"
        );
        slot.logical_index = new_logical_index;
        slot.scroll_offset = 0;
    }

    pub fn scroll_offset(&self, handle: SlotHandle) -> usize {
        self.slots.get(&handle).map_or(0, |s| s.scroll_offset)
    }

    /// Store a new offset for a slot. Ignored for slots never observed.
    pub fn set_scroll_offset(&mut self, handle: SlotHandle, offset: usize) {
        if let Some(slot) = self.slots.get_mut(&handle) {
            slot.scroll_offset = offset;
        }
    }

    /// The identity a slot hosted at the last observation.
    pub fn identity(&self, handle: SlotHandle) -> Option<&str> {
        self.slots.get(&handle).map(|s| s.identity.as_str())
    }

    /// Forget slots that are no longer materialized.
    pub fn retain(&mut self, mut keep: impl FnMut(SlotHandle) -> bool) {
        self.slots.retain(|handle, _| keep(*handle));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
