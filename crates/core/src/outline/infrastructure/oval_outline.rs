use crate::outline::domain::outline_region::OutlineRegion;
use crate::shared::geometry::{Rect, Size};

use super::rect_outline::centered_bounds;

/// Oval guide inscribed in `bounds`. A box is inside when every corner
/// satisfies the closed ellipse inequality.
pub struct OvalOutline {
    overlay: Size,
    bounds: Rect,
}

impl OvalOutline {
    pub fn new(overlay: Size, bounds: Rect) -> Self {
        Self { overlay, bounds }
    }

    pub fn centered(overlay: Size, width: f32, height: f32) -> Self {
        Self::new(overlay, centered_bounds(overlay, width, height))
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        let (cx, cy) = self.bounds.center();
        let semi_a = self.bounds.width() / 2.0;
        let semi_b = self.bounds.height() / 2.0;
        if semi_a <= 0.0 || semi_b <= 0.0 {
            return false;
        }
        let dx = (x - cx) / semi_a;
        let dy = (y - cy) / semi_b;
        dx * dx + dy * dy <= 1.0
    }
}

impl OutlineRegion for OvalOutline {
    fn contains(&self, rect: &Rect) -> bool {
        rect.corners()
            .iter()
            .all(|&(x, y)| self.contains_point(x, y))
    }

    fn size(&self) -> Size {
        self.overlay
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oval() -> OvalOutline {
        // Center (200, 400), semi-axes 100 x 200.
        OvalOutline::new(Size::new(400.0, 800.0), Rect::new(100.0, 200.0, 300.0, 600.0))
    }

    #[test]
    fn test_small_centered_box_is_inside() {
        assert!(oval().contains(&Rect::new(170.0, 340.0, 230.0, 460.0)));
    }

    #[test]
    fn test_bounding_box_corners_are_outside() {
        // Corners of the bounding rectangle lie at ellipse distance 2.0.
        assert!(!oval().contains(&Rect::new(100.0, 200.0, 300.0, 600.0)));
    }

    #[test]
    fn test_inscribed_box_touches_ellipse() {
        // Corners at (cx ± a/√2, cy ± b/√2) sit exactly on the ellipse;
        // shrink slightly to stay clear of float rounding.
        let hx = 100.0 / 2f32.sqrt() - 0.01;
        let hy = 200.0 / 2f32.sqrt() - 0.01;
        assert!(oval().contains(&Rect::new(200.0 - hx, 400.0 - hy, 200.0 + hx, 400.0 + hy)));
    }

    #[test]
    fn test_box_inside_bounds_but_outside_ellipse() {
        assert!(!oval().contains(&Rect::new(105.0, 205.0, 150.0, 260.0)));
    }

    #[test]
    fn test_degenerate_oval_contains_nothing() {
        let flat = OvalOutline::new(Size::new(10.0, 10.0), Rect::new(5.0, 5.0, 5.0, 5.0));
        assert!(!flat.contains(&Rect::new(5.0, 5.0, 5.0, 5.0)));
    }
}
