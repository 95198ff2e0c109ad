use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle with edges in floating point pixels.
///
/// Used for both frame-space detector boxes and overlay-space face bounds;
/// which space a value lives in is decided by where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Corners in clockwise order starting at top-left.
    pub fn corners(&self) -> [(f32, f32); 4] {
        [
            (self.left, self.top),
            (self.right, self.top),
            (self.right, self.bottom),
            (self.left, self.bottom),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Closed containment: touching edges count as inside.
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Width/height pair for overlays and effective frame dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dimensions_and_center() {
        let r = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_relative_eq!(r.width(), 100.0);
        assert_relative_eq!(r.height(), 50.0);
        let (cx, cy) = r.center();
        assert_relative_eq!(cx, 60.0);
        assert_relative_eq!(cy, 45.0);
    }

    #[test]
    fn test_corners_order() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        assert_eq!(
            r.corners(),
            [(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)]
        );
    }

    #[test]
    fn test_contains_point_is_closed() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(0.0, 0.0));
        assert!(r.contains_point(10.0, 10.0));
        assert!(!r.contains_point(10.01, 5.0));
    }

    #[test]
    fn test_nan_rect_is_not_finite() {
        let r = Rect::new(f32::NAN, 0.0, 1.0, 1.0);
        assert!(!r.is_finite());
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_finite());
    }

    #[test]
    fn test_size_usable() {
        assert!(Size::new(1.0, 1.0).is_usable());
        assert!(!Size::new(0.0, 10.0).is_usable());
        assert!(!Size::new(10.0, -1.0).is_usable());
        assert!(!Size::new(f32::NAN, 10.0).is_usable());
        assert!(!Size::new(10.0, f32::INFINITY).is_usable());
    }
}
