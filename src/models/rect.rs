use serde::{Deserialize, Serialize};

/// A rectangle as reported by the window manager.
///
/// Both a container's current placement (`rect`) and its original window
/// geometry (`geometry`) use this shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Euclidean distance between the origins of two rectangles.
    pub fn origin_distance(&self, other: &Rect) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    pub fn same_origin(&self, other: &Rect) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// True when `other`'s vertical span covers one of this rectangle's
    /// vertical edges. Used to find candidates for horizontal moves.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        (other.y <= self.y && self.y <= other.bottom())
            || (other.y <= self.bottom() && self.bottom() <= other.bottom())
    }

    /// Horizontal counterpart of [`Rect::overlaps_vertically`], used for
    /// vertical moves.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        (other.x <= self.x && self.x <= other.right())
            || (other.x <= self.right() && self.right() < other.right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn origin_distance_is_euclidean() {
        let a = rect(0, 0, 100, 100);
        let b = rect(3, 4, 100, 100);
        assert!((a.origin_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vertical_overlap_detects_shared_span() {
        let origin = rect(0, 100, 100, 100);
        let beside = rect(200, 150, 100, 400);
        let above = rect(200, 0, 100, 50);
        assert!(origin.overlaps_vertically(&beside));
        assert!(!origin.overlaps_vertically(&above));
    }

    #[test]
    fn horizontal_overlap_detects_shared_span() {
        let origin = rect(100, 0, 100, 100);
        let below = rect(150, 200, 400, 100);
        let left = rect(0, 200, 50, 100);
        assert!(origin.overlaps_horizontally(&below));
        assert!(!origin.overlaps_horizontally(&left));
    }
}
