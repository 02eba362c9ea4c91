use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::watch;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::attribution::{attribute, Attribution, AttributionConfig, Trigger, TriggerStrategy};
use crate::cart::{CartLedger, Highlight};
use crate::events::EventSlot;
use crate::settings::ZoneStore;
use crate::tracking::{TrackFeed, TrackedEntity};
use crate::zone::Zone;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

pub const FRAME_INTERVAL_MS: u64 = 33;

/// Everything a renderer needs to draw one frame's worth of state. Published
/// over a watch channel after every tick; rendering itself lives elsewhere.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShelfView {
    pub entities: Vec<TrackedEntity>,
    pub zone: Zone,
    pub counts: HashMap<u32, u32>,
    /// Person to draw highlighted as the most recent taker, if the
    /// highlight is still fresh.
    pub highlight_id: Option<u32>,
}

/// The main loop: once per frame interval, poll the tracker feed, give the
/// trigger a look at who is in the zone, consume a pending weight event if
/// the trigger allows it, and publish a fresh view.
///
/// The loop never waits on the ingest side — it just checks the slot once
/// per tick. It ends when the feed reports the capture source is gone or the
/// token fires.
pub async fn frame_loop(
    mut feed: Box<dyn TrackFeed>,
    slot: EventSlot,
    zone_store: Arc<ZoneStore>,
    config: AttributionConfig,
    strategy: TriggerStrategy,
    view_tx: watch::Sender<ShelfView>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ledger = CartLedger::new();
    let mut trigger = Trigger::new(strategy);
    let mut highlight: Option<Highlight> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = match feed.next_frame() {
                    Ok(Some(snapshot)) => snapshot,
                    Ok(None) => {
                        log_info!("track feed ended, frame loop stopping");
                        break;
                    }
                    Err(err) => {
                        // Transient tracker hiccup: skip this frame, the
                        // feed owns its own recovery.
                        log_error!("track feed error, skipping frame: {err:#}");
                        continue;
                    }
                };

                let zone = zone_store.zone();
                let now = Instant::now();
                trigger.observe_frame(&snapshot.entities, &zone, now);

                if let Some(outcome) = consume_pending(
                    &slot,
                    &trigger,
                    &snapshot.entities,
                    &zone,
                    &config,
                    &mut ledger,
                    &mut highlight,
                    now,
                ) {
                    log_outcome(&outcome);
                }

                let view = build_view(&snapshot.entities, &zone, &ledger, &highlight, now);
                // Receivers may come and go; a send failure just means
                // nobody is rendering right now.
                let _ = view_tx.send(view);
            }
            _ = cancel_token.cancelled() => {
                log_info!("frame loop shutting down");
                break;
            }
        }
    }
}

/// One frame's event hand-off: if the slot holds an event and the trigger
/// strategy says it may be processed, take it (clearing the slot — the
/// event is consumed exactly once regardless of the outcome) and run
/// attribution. Returns `None` when nothing was consumed this frame.
#[allow(clippy::too_many_arguments)]
pub fn consume_pending(
    slot: &EventSlot,
    trigger: &Trigger,
    entities: &[TrackedEntity],
    zone: &Zone,
    config: &AttributionConfig,
    ledger: &mut CartLedger,
    highlight: &mut Option<Highlight>,
    now: Instant,
) -> Option<Attribution> {
    if !slot.is_pending() || !trigger.is_eligible(now) {
        return None;
    }

    let event = slot.take()?;
    let outcome = attribute(entities, zone, event, config, ledger);

    match outcome {
        Attribution::Taken { id, .. } | Attribution::Restocked { id, .. } => {
            *highlight = Some(Highlight::new(id, config.highlight_duration));
        }
        _ => {}
    }

    Some(outcome)
}

fn build_view(
    entities: &[TrackedEntity],
    zone: &Zone,
    ledger: &CartLedger,
    highlight: &Option<Highlight>,
    now: Instant,
) -> ShelfView {
    ShelfView {
        entities: entities.to_vec(),
        zone: *zone,
        counts: ledger.counts().clone(),
        highlight_id: highlight
            .as_ref()
            .filter(|h| h.is_active(now))
            .map(|h| h.taker_id),
    }
}

fn log_outcome(outcome: &Attribution) {
    match outcome {
        Attribution::Taken { id, units, distance } => {
            log_info!("person #{id} took {units} unit(s) (dist={distance:.1})");
        }
        Attribution::Restocked { id, units, distance } => {
            log_info!("person #{id} returned {units} unit(s) (dist={distance:.1})");
        }
        Attribution::RestockLogged { id, distance } => {
            log_info!("weight increased near person #{id} (dist={distance:.1}), carts unchanged");
        }
        Attribution::NoEntities => {
            log_warn!("scale event with nobody in frame, dropping it");
        }
        Attribution::Ignored => {
            log_warn!("scale reported a zero delta, ignoring");
        }
    }
}
