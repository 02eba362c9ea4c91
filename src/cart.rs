use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-person running count of attributed units. Entries are created on
/// first attribution and never removed; the map lives for the session and
/// grows with the number of distinct track ids, which is fine for a bounded
/// demo run.
#[derive(Debug, Default)]
pub struct CartLedger {
    counts: HashMap<u32, u32>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }

    pub fn add(&mut self, id: u32, units: u32) {
        *self.counts.entry(id).or_insert(0) += units;
    }

    /// Remove units from a cart, flooring at zero. Only used when the
    /// restock-decrement policy is enabled.
    pub fn remove(&mut self, id: u32, units: u32) {
        let entry = self.counts.entry(id).or_insert(0);
        *entry = entry.saturating_sub(units);
    }

    pub fn counts(&self) -> &HashMap<u32, u32> {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Transient "who just took something" marker for the rendering layer.
/// Overwritten on each attribution; never authoritative state.
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub taker_id: u32,
    pub valid_until: Instant,
}

impl Highlight {
    pub fn new(taker_id: u32, duration: Duration) -> Self {
        Self {
            taker_id,
            valid_until: Instant::now() + duration,
        }
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now < self.valid_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_reads_as_zero() {
        let ledger = CartLedger::new();
        assert_eq!(ledger.get(42), 0);
    }

    #[test]
    fn add_creates_and_accumulates() {
        let mut ledger = CartLedger::new();
        ledger.add(7, 2);
        ledger.add(7, 1);
        assert_eq!(ledger.get(7), 3);
        assert_eq!(ledger.counts().len(), 1);
    }

    #[test]
    fn remove_floors_at_zero() {
        let mut ledger = CartLedger::new();
        ledger.add(3, 1);
        ledger.remove(3, 5);
        assert_eq!(ledger.get(3), 0);
    }

    #[test]
    fn highlight_expires() {
        let highlight = Highlight::new(9, Duration::from_secs(0));
        assert!(!highlight.is_active(Instant::now() + Duration::from_millis(1)));
    }
}
