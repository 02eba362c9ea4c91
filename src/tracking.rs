use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Axis-aligned box in frame pixel coordinates, (x1, y1) top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x1 + self.x2) as f64 / 2.0,
            (self.y1 + self.y2) as f64 / 2.0,
        )
    }
}

/// One person as reported by the external tracker. The id is assigned by the
/// tracker and stays stable across frames for as long as tracking holds;
/// re-identification after occlusion is the tracker's problem, not ours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackedEntity {
    pub id: u32,
    pub bbox: BoundingBox,
}

impl TrackedEntity {
    pub fn new(id: u32, bbox: BoundingBox) -> Self {
        Self { id, bbox }
    }
}

/// The tracker's output for a single frame: an ordered, possibly empty list
/// of tracked people. Order matters — equal-distance ties during attribution
/// go to the first entity reported.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub entities: Vec<TrackedEntity>,
    pub timestamp: DateTime<Utc>,
}

impl FrameSnapshot {
    pub fn new(entities: Vec<TrackedEntity>) -> Self {
        Self {
            entities,
            timestamp: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Seam to the external detector/tracker. The pipeline polls this once per
/// tick; `Ok(None)` means the capture source is gone and the loop should end.
pub trait TrackFeed: Send {
    fn next_frame(&mut self) -> Result<Option<FrameSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_center_is_midpoint() {
        let bbox = BoundingBox::new(100.0, 200.0, 300.0, 400.0);
        assert_eq!(bbox.center(), (200.0, 300.0));
    }
}
