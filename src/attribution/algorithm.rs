use crate::cart::CartLedger;
use crate::events::WeightEvent;
use crate::tracking::TrackedEntity;
use crate::zone::Zone;

use super::config::AttributionConfig;

/// Outcome of processing one weight event against one frame's tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribution {
    /// Nobody in frame; the event is dropped and the ledger untouched.
    NoEntities,
    /// Zero delta. The scale shouldn't emit these; treated as a no-op.
    Ignored,
    /// Mass left the shelf: `units` added to person `id`'s cart.
    Taken { id: u32, units: u32, distance: f64 },
    /// Mass returned and the decrement policy is enabled: `units` removed
    /// from person `id`'s cart (floored at zero).
    Restocked { id: u32, units: u32, distance: f64 },
    /// Mass returned but the policy only logs it; no cart changes.
    RestockLogged { id: u32, distance: f64 },
}

/// Find the tracked person whose bbox center is nearest the zone, by
/// point-to-rectangle distance (zero inside the zone). Exact ties go to the
/// first entity in the tracker's reported order — that preserves the
/// behavior attribution has always had, and it is documented rather than
/// replaced with an id-based tie-break.
pub fn nearest_entity<'a>(
    entities: &'a [TrackedEntity],
    zone: &Zone,
) -> Option<(&'a TrackedEntity, f64)> {
    let mut best: Option<(&TrackedEntity, f64)> = None;
    for entity in entities {
        let (cx, cy) = entity.bbox.center();
        let dist = zone.distance_to(cx, cy);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((entity, dist)),
        }
    }
    best
}

/// Attribute one pending weight event to the nearest tracked person and
/// apply the sign policy to the cart ledger. Never blocks, never fails; an
/// empty entity set just means the event had nobody to land on.
///
/// The caller is responsible for having already consumed the event from the
/// pending slot — by the time this runs, the event is spent no matter what
/// the outcome is.
pub fn attribute(
    entities: &[TrackedEntity],
    zone: &Zone,
    event: WeightEvent,
    config: &AttributionConfig,
    ledger: &mut CartLedger,
) -> Attribution {
    if event.delta_grams == 0 {
        return Attribution::Ignored;
    }

    let Some((entity, distance)) = nearest_entity(entities, zone) else {
        return Attribution::NoEntities;
    };

    let units = units_for(event.delta_grams, config.unit_weight_grams);

    if event.delta_grams < 0 {
        ledger.add(entity.id, units);
        Attribution::Taken {
            id: entity.id,
            units,
            distance,
        }
    } else if config.restock_decrement {
        ledger.remove(entity.id, units);
        Attribution::Restocked {
            id: entity.id,
            units,
            distance,
        }
    } else {
        Attribution::RestockLogged {
            id: entity.id,
            distance,
        }
    }
}

/// Convert a gram delta to a unit count: round(|delta| / unit_weight).
fn units_for(delta_grams: i32, unit_weight_grams: u32) -> u32 {
    let unit = unit_weight_grams.max(1) as f64;
    (delta_grams.unsigned_abs() as f64 / unit).round() as u32
}
