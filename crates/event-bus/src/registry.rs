//! Per-bus registry of subscriber lists.
//!
//! Slots are never shifted while a fire pass iterates their list: removal
//! writes a tombstone and only compaction (deferred until every pass over
//! that list has finished) shrinks it.

use crate::config::CompactionPolicy;
use crate::handler::Handler;
use std::collections::HashMap;

/// One position in a subscriber list.
pub(crate) enum Slot<A: ?Sized> {
    Live(Handler<A>),
    Tombstone,
}

/// Ordered subscriber slots for one event name.
pub(crate) struct SubscriberList<A: ?Sized> {
    slots: Vec<Slot<A>>,
    tombstones: usize,
    /// Fire passes currently iterating this list (nested or concurrent).
    active_passes: usize,
}

impl<A: ?Sized> SubscriberList<A> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            tombstones: 0,
            active_passes: 0,
        }
    }

    pub(crate) fn push(&mut self, handler: Handler<A>) {
        self.slots.push(Slot::Live(handler));
    }

    /// Tombstone every slot holding `handler`. Returns the number blanked.
    pub(crate) fn remove(&mut self, handler: &Handler<A>) -> usize {
        let mut removed = 0;
        for slot in &mut self.slots {
            if matches!(slot, Slot::Live(h) if h.same_as(handler)) {
                *slot = Slot::Tombstone;
                removed += 1;
            }
        }
        self.tombstones += removed;
        removed
    }

    /// Tombstone every live slot. Returns the number blanked.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.live();
        for slot in &mut self.slots {
            *slot = Slot::Tombstone;
        }
        self.tombstones = self.slots.len();
        removed
    }

    /// Handler at `index`, if that slot exists and is live.
    pub(crate) fn handler_at(&self, index: usize) -> Option<Handler<A>> {
        match self.slots.get(index) {
            Some(Slot::Live(handler)) => Some(handler.clone()),
            _ => None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.tombstones
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn is_firing(&self) -> bool {
        self.active_passes > 0
    }

    fn wants_compaction(&self, policy: CompactionPolicy) -> bool {
        if self.is_firing() {
            return false;
        }
        match policy {
            CompactionPolicy::Never => false,
            CompactionPolicy::Eager => self.tombstones > 0,
            CompactionPolicy::Threshold(limit) => self.tombstones >= limit,
        }
    }

    /// Drop tombstones, keeping live slots in order. Returns slots reclaimed.
    fn compact(&mut self) -> usize {
        let reclaimed = self.tombstones;
        self.slots.retain(|slot| matches!(slot, Slot::Live(_)));
        self.tombstones = 0;
        reclaimed
    }
}

/// Mapping from event name to subscriber list.
pub(crate) struct Registry<A: ?Sized> {
    events: HashMap<String, SubscriberList<A>>,
}

impl<A: ?Sized> Registry<A> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            events: HashMap::with_capacity(capacity),
        }
    }

    pub(crate) fn list(&self, name: &str) -> Option<&SubscriberList<A>> {
        self.events.get(name)
    }

    pub(crate) fn list_mut(&mut self, name: &str) -> Option<&mut SubscriberList<A>> {
        self.events.get_mut(name)
    }

    pub(crate) fn list_or_create(&mut self, name: &str) -> &mut SubscriberList<A> {
        self.events
            .entry(name.to_string())
            .or_insert_with(SubscriberList::new)
    }

    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().cloned().collect();
        names.sort();
        names
    }

    /// Pin the list for `name` for one pass. Returns the slot count the
    /// pass will visit, or `None` for an unknown name.
    pub(crate) fn begin_fire(&mut self, name: &str) -> Option<usize> {
        let list = self.events.get_mut(name)?;
        list.active_passes += 1;
        Some(list.len())
    }

    /// Release one pass over `name`, compacting the list if it was the last
    /// one and the policy asks for it. Returns slots reclaimed.
    pub(crate) fn end_fire(&mut self, name: &str, policy: CompactionPolicy) -> usize {
        if let Some(list) = self.events.get_mut(name) {
            list.active_passes = list.active_passes.saturating_sub(1);
        }
        self.compact_one(name, policy)
    }

    /// Compact the list for `name` if the policy asks for it and no pass is
    /// iterating it. Lists left empty are dropped. Returns slots reclaimed.
    pub(crate) fn compact_one(&mut self, name: &str, policy: CompactionPolicy) -> usize {
        let Some(list) = self.events.get_mut(name) else {
            return 0;
        };
        if !list.wants_compaction(policy) {
            return 0;
        }
        let reclaimed = list.compact();
        if list.is_empty() {
            self.events.remove(name);
        }
        reclaimed
    }
}
