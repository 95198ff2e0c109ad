use crate::outline::domain::outline_region::OutlineRegion;
use crate::shared::geometry::{Rect, Size};

/// Rectangular guide: a box is inside when all four corners are.
pub struct RectOutline {
    overlay: Size,
    bounds: Rect,
}

impl RectOutline {
    pub fn new(overlay: Size, bounds: Rect) -> Self {
        Self { overlay, bounds }
    }

    /// A `width` x `height` guide centered in the overlay.
    pub fn centered(overlay: Size, width: f32, height: f32) -> Self {
        Self::new(overlay, centered_bounds(overlay, width, height))
    }
}

impl OutlineRegion for RectOutline {
    fn contains(&self, rect: &Rect) -> bool {
        rect.corners()
            .iter()
            .all(|&(x, y)| self.bounds.contains_point(x, y))
    }

    fn size(&self) -> Size {
        self.overlay
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

pub(crate) fn centered_bounds(overlay: Size, width: f32, height: f32) -> Rect {
    let left = (overlay.width - width) / 2.0;
    let top = (overlay.height - height) / 2.0;
    Rect::new(left, top, left + width, top + height)
}
