use std::time::{Duration, Instant};

use crate::tracking::TrackedEntity;
use crate::zone::Zone;

/// When a pending weight event may be consumed.
///
/// The plain `Proximity` strategy processes an event on the first frame it
/// is seen — nearest-person attribution alone decides who it lands on.
/// `RegionPresence` additionally requires that somebody was actually inside
/// the zone within the trailing window; until then the event stays pending
/// (and can still be overwritten by a newer one). This is the alternative
/// main-loop variant, generalized from its hand-in-zone buffer to a
/// person-presence buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerStrategy {
    Proximity,
    RegionPresence { window: Duration },
}

impl Default for TriggerStrategy {
    fn default() -> Self {
        TriggerStrategy::Proximity
    }
}

/// Per-frame trigger state: remembers when the zone last had someone in it.
#[derive(Debug)]
pub struct Trigger {
    strategy: TriggerStrategy,
    last_presence: Option<Instant>,
}

impl Trigger {
    pub fn new(strategy: TriggerStrategy) -> Self {
        Self {
            strategy,
            last_presence: None,
        }
    }

    /// Feed one frame's tracks. Records presence when any bbox center lies
    /// within the zone.
    pub fn observe_frame(&mut self, entities: &[TrackedEntity], zone: &Zone, now: Instant) {
        let anyone_inside = entities.iter().any(|entity| {
            let (cx, cy) = entity.bbox.center();
            zone.contains(cx, cy)
        });
        if anyone_inside {
            self.last_presence = Some(now);
        }
    }

    /// May the frame loop consume a pending event right now?
    pub fn is_eligible(&self, now: Instant) -> bool {
        match self.strategy {
            TriggerStrategy::Proximity => true,
            TriggerStrategy::RegionPresence { window } => self
                .last_presence
                .map(|at| now.duration_since(at) <= window)
                .unwrap_or(false),
        }
    }
}
