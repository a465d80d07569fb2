#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{Point, Rect, Size, boxes_overlap};

/// The cursor's hotspot box: a square of `size` anchored at the cursor's top-left.
#[must_use]
pub fn hotspot(cursor: Point, size: f64) -> Rect {
    Rect::from_origin(cursor, Size::new(size, size))
}

/// Whether the hotspot touches the element with positive area.
#[must_use]
pub fn hits(hotspot: &Rect, element: &Rect) -> bool {
    boxes_overlap(hotspot, element)
}
