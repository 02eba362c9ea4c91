use serde::{Deserialize, Serialize};

/// Smallest width/height a zone may have after loading a persisted config.
pub const MIN_ZONE_SIZE: i32 = 10;

/// Smallest span a corner-resize may shrink the zone to. Slightly larger than
/// the load-time floor so a drag can't collapse the rectangle under a handle.
pub const MIN_RESIZE_SPAN: i32 = 20;

/// Radius (px) around a corner handle that counts as grabbing it.
pub const HANDLE_RADIUS: i32 = 10;

/// The monitored shelf area, in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Default for Zone {
    fn default() -> Self {
        // Matches the shipped demo's out-of-the-box shelf rectangle.
        Self {
            x: 300,
            y: 250,
            w: 200,
            h: 150,
        }
    }
}

impl Zone {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x as f64
            && px <= self.right() as f64
            && py >= self.y as f64
            && py <= self.bottom() as f64
    }

    /// Distance from a point to this rectangle: 0.0 if the point lies inside
    /// (inclusive bounds), otherwise the Euclidean distance to the nearest
    /// point on the boundary. Computed by clamping the point into the
    /// rectangle's x- and y-spans and taking the norm of the offsets.
    pub fn distance_to(&self, px: f64, py: f64) -> f64 {
        let (x1, y1) = (self.x as f64, self.y as f64);
        let (x2, y2) = (self.right() as f64, self.bottom() as f64);

        let dx = if px < x1 {
            x1 - px
        } else if px > x2 {
            px - x2
        } else {
            0.0
        };
        let dy = if py < y1 {
            y1 - py
        } else if py > y2 {
            py - y2
        } else {
            0.0
        };

        dx.hypot(dy)
    }

    /// Corner handles in (corner, position) pairs.
    pub fn handles(&self) -> [(Corner, (i32, i32)); 4] {
        [
            (Corner::TopLeft, (self.x, self.y)),
            (Corner::TopRight, (self.right(), self.y)),
            (Corner::BottomLeft, (self.x, self.bottom())),
            (Corner::BottomRight, (self.right(), self.bottom())),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    fn moves_left_edge(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn moves_top_edge(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

#[derive(Debug, Clone, Copy)]
enum DragKind {
    Move,
    Resize(Corner),
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    kind: DragKind,
    start: (i32, i32),
    zone_at_start: Zone,
}

/// Pointer-drag editor for the zone rectangle: press on a corner handle to
/// resize from that corner, press inside the rectangle to move it. All edits
/// are clamped to the frame bounds and the minimum resize span. Pure state
/// machine; callers feed it pointer events in frame pixel coordinates.
#[derive(Debug, Default)]
pub struct ZoneEditor {
    drag: Option<Drag>,
}

impl ZoneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer pressed at (px, py). Returns true if a drag started.
    pub fn press(&mut self, zone: &Zone, px: i32, py: i32) -> bool {
        let kind = if let Some(corner) = hit_handle(zone, px, py) {
            Some(DragKind::Resize(corner))
        } else if zone.contains(px as f64, py as f64) {
            Some(DragKind::Move)
        } else {
            None
        };

        self.drag = kind.map(|kind| Drag {
            kind,
            start: (px, py),
            zone_at_start: *zone,
        });
        self.drag.is_some()
    }

    /// Pointer moved to (px, py) while held. Mutates the zone in place.
    pub fn drag(&mut self, zone: &mut Zone, px: i32, py: i32, frame_w: i32, frame_h: i32) {
        let Some(drag) = self.drag else {
            return;
        };

        let dx = px - drag.start.0;
        let dy = py - drag.start.1;
        let start = drag.zone_at_start;

        match drag.kind {
            DragKind::Move => {
                zone.x = clamp(start.x + dx, 0, (frame_w - start.w).max(0));
                zone.y = clamp(start.y + dy, 0, (frame_h - start.h).max(0));
            }
            DragKind::Resize(corner) => {
                let mut left = start.x;
                let mut top = start.y;
                let mut right = start.right();
                let mut bottom = start.bottom();

                if corner.moves_left_edge() {
                    left = clamp(start.x + dx, 0, right - MIN_RESIZE_SPAN);
                } else {
                    right = clamp(start.right() + dx, left + MIN_RESIZE_SPAN, frame_w);
                }
                if corner.moves_top_edge() {
                    top = clamp(start.y + dy, 0, bottom - MIN_RESIZE_SPAN);
                } else {
                    bottom = clamp(start.bottom() + dy, top + MIN_RESIZE_SPAN, frame_h);
                }

                zone.x = left;
                zone.y = top;
                zone.w = right - left;
                zone.h = bottom - top;
            }
        }
    }

    /// Pointer released; ends any active drag.
    pub fn release(&mut self) {
        self.drag = None;
    }
}

fn hit_handle(zone: &Zone, px: i32, py: i32) -> Option<Corner> {
    for (corner, (hx, hy)) in zone.handles() {
        let dx = px - hx;
        let dy = py - hy;
        if dx * dx + dy * dy <= HANDLE_RADIUS * HANDLE_RADIUS {
            return Some(corner);
        }
    }
    None
}

fn clamp(val: i32, min_v: i32, max_v: i32) -> i32 {
    val.max(min_v).min(max_v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_zero_inside_and_on_edges() {
        let zone = Zone::new(300, 250, 200, 150);
        assert_eq!(zone.distance_to(350.0, 300.0), 0.0);
        // Inclusive boundary
        assert_eq!(zone.distance_to(300.0, 250.0), 0.0);
        assert_eq!(zone.distance_to(500.0, 400.0), 0.0);
    }

    #[test]
    fn distance_outside_one_axis() {
        let zone = Zone::new(100, 100, 50, 50);
        // Directly left of the rectangle: pure horizontal distance
        assert_eq!(zone.distance_to(70.0, 120.0), 30.0);
        // Directly below: pure vertical distance
        assert_eq!(zone.distance_to(120.0, 180.0), 30.0);
    }

    #[test]
    fn distance_outside_corner_is_euclidean() {
        let zone = Zone::new(100, 100, 50, 50);
        // 3-4-5 triangle off the top-left corner
        let d = zone.distance_to(97.0, 96.0);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn distance_grows_monotonically_along_an_axis() {
        let zone = Zone::new(100, 100, 50, 50);
        let mut prev = zone.distance_to(150.0, 125.0);
        for step in 1..20 {
            let d = zone.distance_to(150.0 + step as f64 * 7.0, 125.0);
            assert!(d > prev, "distance must strictly increase moving away");
            prev = d;
        }
    }

    #[test]
    fn move_drag_clamps_to_frame() {
        let mut zone = Zone::new(10, 10, 100, 100);
        let mut editor = ZoneEditor::new();
        assert!(editor.press(&zone, 50, 50));

        // Drag far past the top-left corner of the frame
        editor.drag(&mut zone, -500, -500, 640, 480);
        assert_eq!((zone.x, zone.y), (0, 0));

        // And far past the bottom-right
        editor.drag(&mut zone, 5000, 5000, 640, 480);
        assert_eq!((zone.x, zone.y), (640 - 100, 480 - 100));
        assert_eq!((zone.w, zone.h), (100, 100));
    }

    #[test]
    fn corner_resize_respects_minimum_span() {
        let mut zone = Zone::new(100, 100, 100, 100);
        let mut editor = ZoneEditor::new();
        // Grab the bottom-right handle
        assert!(editor.press(&zone, 200, 200));

        // Collapse toward the opposite corner
        editor.drag(&mut zone, -500, -500, 640, 480);
        assert_eq!((zone.w, zone.h), (MIN_RESIZE_SPAN, MIN_RESIZE_SPAN));
        assert_eq!((zone.x, zone.y), (100, 100));
    }

    #[test]
    fn press_outside_zone_starts_no_drag() {
        let zone = Zone::new(100, 100, 50, 50);
        let mut editor = ZoneEditor::new();
        assert!(!editor.press(&zone, 500, 500));
        assert!(!editor.is_dragging());
    }

    #[test]
    fn press_on_handle_resizes_instead_of_moving() {
        let mut zone = Zone::new(100, 100, 100, 100);
        let mut editor = ZoneEditor::new();
        // Within HANDLE_RADIUS of the top-left corner
        assert!(editor.press(&zone, 105, 95));

        editor.drag(&mut zone, 125, 115, 640, 480);
        // Left/top edges moved in by 20, right/bottom unchanged
        assert_eq!((zone.x, zone.y), (120, 120));
        assert_eq!((zone.right(), zone.bottom()), (200, 200));
    }
}
