use std::sync::{Arc, Mutex};

use super::payload::WeightEvent;

/// Single-slot hand-off between the ingest listener and the frame loop.
///
/// Semantics: at most one event is pending at a time. `post` unconditionally
/// replaces any unconsumed value — if two weight changes land within one
/// frame interval, the frame loop only ever sees the latest one. That
/// last-write-wins behavior is deliberate and documented; the mutex just
/// makes the hand-off race-free, it does not queue.
#[derive(Debug, Clone, Default)]
pub struct EventSlot {
    inner: Arc<Mutex<Option<WeightEvent>>>,
}

impl EventSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Producer side: overwrite whatever is pending.
    pub fn post(&self, event: WeightEvent) {
        let mut guard = self.inner.lock().unwrap();
        *guard = Some(event);
    }

    /// Consumer side: clear the slot and return the pending event, if any.
    pub fn take(&self) -> Option<WeightEvent> {
        self.inner.lock().unwrap().take()
    }

    /// Non-consuming check used by trigger gating: is something pending?
    pub fn is_pending(&self) -> bool {
        self.inner.lock().unwrap().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_on_empty_slot_is_none() {
        let slot = EventSlot::new();
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_consumes_the_event() {
        let slot = EventSlot::new();
        slot.post(WeightEvent::new(-350));
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(-350));
        // Consumed: a second take sees nothing
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn second_post_overwrites_unconsumed_first() {
        // Two events inside one frame interval: last write wins. This is the
        // documented hand-off behavior, not a bug.
        let slot = EventSlot::new();
        slot.post(WeightEvent::new(-350));
        slot.post(WeightEvent::new(-700));
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(-700));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn clones_share_the_same_slot() {
        let slot = EventSlot::new();
        let producer = slot.clone();
        producer.post(WeightEvent::new(42));
        assert!(slot.is_pending());
        assert_eq!(slot.take().map(|e| e.delta_grams), Some(42));
    }
}
