use crate::detection::domain::detected_face::FaceBounds;
use crate::shared::geometry::Rect;

use super::outline_region::OutlineRegion;

/// Whether a transformed face box sits fully inside the outline.
///
/// Boxes with non-finite edges are never contained.
pub fn is_contained(face_box: &Rect, outline: &dyn OutlineRegion) -> bool {
    face_box.is_finite() && outline.contains(face_box)
}

/// True if at least one face is contained. An empty batch never is.
pub fn any_contained(faces: &[FaceBounds], outline: &dyn OutlineRegion) -> bool {
    faces.iter().any(|f| is_contained(&f.bounds, outline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::infrastructure::rect_outline::RectOutline;
    use crate::shared::geometry::Size;

    fn outline() -> RectOutline {
        RectOutline::new(Size::new(400.0, 800.0), Rect::new(100.0, 200.0, 300.0, 600.0))
    }

    fn face(left: f32, top: f32, right: f32, bottom: f32) -> FaceBounds {
        FaceBounds {
            tracking_id: Some(1),
            bounds: Rect::new(left, top, right, bottom),
        }
    }

    #[test]
    fn test_box_strictly_inside_is_contained() {
        assert!(is_contained(&Rect::new(150.0, 250.0, 250.0, 550.0), &outline()));
    }

    #[test]
    fn test_one_corner_outside_is_not_contained() {
        assert!(!is_contained(&Rect::new(150.0, 250.0, 301.0, 550.0), &outline()));
        assert!(!is_contained(&Rect::new(99.0, 250.0, 250.0, 550.0), &outline()));
    }

    #[test]
    fn test_nan_box_is_not_contained() {
        assert!(!is_contained(&Rect::new(f32::NAN, 250.0, 250.0, 550.0), &outline()));
    }

    #[test]
    fn test_empty_batch_never_contains() {
        assert!(!any_contained(&[], &outline()));
    }

    #[test]
    fn test_any_contained_needs_only_one() {
        let faces = [face(0.0, 0.0, 50.0, 50.0), face(150.0, 250.0, 250.0, 550.0)];
        assert!(any_contained(&faces, &outline()));
        assert!(!any_contained(&faces[..1], &outline()));
    }
}
