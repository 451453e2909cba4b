//! Clickable regions of the sprite frame.
//!
//! Three rectangles sit on top of the frame: one centered along the top edge
//! and one vertically centered on each side. Right-clicking one of them pats
//! the gremlin or triggers a side action.

use arrayvec::ArrayVec;
use serde::Deserialize;

use crate::events::input::Point;
use crate::resources::gremlinstate::GremlinState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotKind {
    Top,
    Left,
    Right,
}

impl HotspotKind {
    /// State entered by a right-click on this hotspot.
    pub fn target_state(self) -> GremlinState {
        match self {
            HotspotKind::Top => GremlinState::Pat,
            HotspotKind::Left => GremlinState::LeftAction,
            HotspotKind::Right => GremlinState::RightAction,
        }
    }
}

/// Hotspot sizes as declared in the character's sprite map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HotspotSettings {
    pub top_hotspot_width: i32,
    pub top_hotspot_height: i32,
    pub side_hotspot_width: i32,
    pub side_hotspot_height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotspot {
    pub kind: HotspotKind,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Hotspot {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hotspots {
    /// In stacking order, bottom first.
    areas: ArrayVec<Hotspot, 3>,
}

impl Hotspots {
    /// Lay out the three hotspots over a frame of the given size.
    pub fn layout(settings: &HotspotSettings, frame_width: i32, frame_height: i32) -> Self {
        let side_y = (frame_height - settings.side_hotspot_height) / 2;
        let mut areas = ArrayVec::new();
        areas.push(Hotspot {
            kind: HotspotKind::Top,
            x: (frame_width - settings.top_hotspot_width) / 2,
            y: 0,
            w: settings.top_hotspot_width,
            h: settings.top_hotspot_height,
        });
        areas.push(Hotspot {
            kind: HotspotKind::Left,
            x: 0,
            y: side_y,
            w: settings.side_hotspot_width,
            h: settings.side_hotspot_height,
        });
        areas.push(Hotspot {
            kind: HotspotKind::Right,
            x: frame_width - settings.side_hotspot_width,
            y: side_y,
            w: settings.side_hotspot_width,
            h: settings.side_hotspot_height,
        });
        Self { areas }
    }

    pub fn get(&self, kind: HotspotKind) -> Option<&Hotspot> {
        self.areas.iter().find(|area| area.kind == kind)
    }

    /// The topmost hotspot under `p`, if any.
    pub fn hit(&self, p: Point) -> Option<HotspotKind> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(p))
            .map(|area| area.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotspots() -> Hotspots {
        let settings = HotspotSettings {
            top_hotspot_width: 40,
            top_hotspot_height: 20,
            side_hotspot_width: 30,
            side_hotspot_height: 60,
        };
        Hotspots::layout(&settings, 100, 120)
    }

    #[test]
    fn test_layout_geometry() {
        let spots = hotspots();
        let top = spots.get(HotspotKind::Top).unwrap();
        assert_eq!((top.x, top.y, top.w, top.h), (30, 0, 40, 20));
        let left = spots.get(HotspotKind::Left).unwrap();
        assert_eq!((left.x, left.y, left.w, left.h), (0, 30, 30, 60));
        let right = spots.get(HotspotKind::Right).unwrap();
        assert_eq!((right.x, right.y, right.w, right.h), (70, 30, 30, 60));
    }

    #[test]
    fn test_hit_testing() {
        let spots = hotspots();
        assert_eq!(spots.hit(Point::new(50, 5)), Some(HotspotKind::Top));
        assert_eq!(spots.hit(Point::new(5, 60)), Some(HotspotKind::Left));
        assert_eq!(spots.hit(Point::new(99, 89)), Some(HotspotKind::Right));
        assert_eq!(spots.hit(Point::new(50, 60)), None);
        assert_eq!(spots.hit(Point::new(100, 60)), None);
    }

    #[test]
    fn test_overlap_prefers_later_hotspot() {
        let settings = HotspotSettings {
            top_hotspot_width: 100,
            top_hotspot_height: 50,
            side_hotspot_width: 30,
            side_hotspot_height: 100,
        };
        let spots = Hotspots::layout(&settings, 100, 100);
        assert_eq!(spots.hit(Point::new(10, 20)), Some(HotspotKind::Left));
        assert_eq!(spots.hit(Point::new(90, 20)), Some(HotspotKind::Right));
        assert_eq!(spots.hit(Point::new(50, 20)), Some(HotspotKind::Top));
    }

    #[test]
    fn test_target_states() {
        assert_eq!(HotspotKind::Top.target_state(), GremlinState::Pat);
        assert_eq!(HotspotKind::Left.target_state(), GremlinState::LeftAction);
        assert_eq!(HotspotKind::Right.target_state(), GremlinState::RightAction);
    }
}
