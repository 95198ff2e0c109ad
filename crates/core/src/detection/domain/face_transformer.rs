use crate::shared::error::EngineError;
use crate::shared::frame::{FrameGeometry, LensFacing};
use crate::shared::geometry::{Rect, Size};

use super::detected_face::{DetectedFace, FaceBounds};

/// Maps a detector box from frame space into overlay space.
///
/// Quarter-turn rotations swap the effective frame axes, each axis is
/// scaled independently to the overlay, and front-lens frames are mirrored
/// horizontally so the overlay matches what the user sees.
pub fn to_face_bounds(
    face: &DetectedFace,
    geometry: &FrameGeometry,
    overlay: Size,
) -> Result<FaceBounds, EngineError> {
    let bounds = transform_box(&face.bounding_box, geometry, overlay)?;
    Ok(FaceBounds {
        tracking_id: face.tracking_id,
        bounds,
    })
}

pub fn transform_box(
    bbox: &Rect,
    geometry: &FrameGeometry,
    overlay: Size,
) -> Result<Rect, EngineError> {
    let (width, height) = geometry.effective_size();
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidGeometry { width, height });
    }
    let width = width as f32;
    let height = height as f32;

    let scale_x = overlay.width / width;
    let scale_y = overlay.height / height;

    let (left, right) = match geometry.lens_facing {
        LensFacing::Front => (width - bbox.right, width - bbox.left),
        LensFacing::Back => (bbox.left, bbox.right),
    };

    Ok(Rect::new(
        scale_x * left,
        scale_y * bbox.top,
        scale_x * right,
        scale_y * bbox.bottom,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Rotation;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn geometry(width: u32, height: u32, rotation: Rotation, lens: LensFacing) -> FrameGeometry {
        FrameGeometry {
            width,
            height,
            rotation,
            lens_facing: lens,
        }
    }

    fn assert_rect_eq(actual: Rect, expected: Rect) {
        assert_relative_eq!(actual.left, expected.left, epsilon = 1e-3);
        assert_relative_eq!(actual.top, expected.top, epsilon = 1e-3);
        assert_relative_eq!(actual.right, expected.right, epsilon = 1e-3);
        assert_relative_eq!(actual.bottom, expected.bottom, epsilon = 1e-3);
    }

    #[test]
    fn test_back_lens_scales_each_axis() {
        // 640x480 frame into a 1280x960 overlay: scale 2 on both axes.
        let g = geometry(640, 480, Rotation::Deg0, LensFacing::Back);
        let out = transform_box(
            &Rect::new(10.0, 20.0, 110.0, 220.0),
            &g,
            Size::new(1280.0, 960.0),
        )
        .unwrap();
        assert_rect_eq(out, Rect::new(20.0, 40.0, 220.0, 440.0));
    }

    #[test]
    fn test_independent_axis_scales() {
        // scale_x = 320/640 = 0.5, scale_y = 960/480 = 2
        let g = geometry(640, 480, Rotation::Deg0, LensFacing::Back);
        let out = transform_box(
            &Rect::new(100.0, 100.0, 200.0, 200.0),
            &g,
            Size::new(320.0, 960.0),
        )
        .unwrap();
        assert_rect_eq(out, Rect::new(50.0, 200.0, 100.0, 400.0));
    }

    #[rstest]
    #[case::deg0(Rotation::Deg0, 640.0, 480.0)]
    #[case::deg180(Rotation::Deg180, 640.0, 480.0)]
    #[case::deg90(Rotation::Deg90, 480.0, 640.0)]
    #[case::deg270(Rotation::Deg270, 480.0, 640.0)]
    fn test_rotation_selects_effective_axes(
        #[case] rotation: Rotation,
        #[case] eff_w: f32,
        #[case] eff_h: f32,
    ) {
        // A box covering the whole effective frame fills the whole overlay.
        let g = geometry(640, 480, rotation, LensFacing::Back);
        let overlay = Size::new(1000.0, 2000.0);
        let out = transform_box(&Rect::new(0.0, 0.0, eff_w, eff_h), &g, overlay).unwrap();
        assert_rect_eq(out, Rect::new(0.0, 0.0, 1000.0, 2000.0));
    }

    #[test]
    fn test_front_lens_mirrors_horizontally() {
        // Effective width 480 after a 90 degree turn, overlay same size.
        let g = geometry(640, 480, Rotation::Deg90, LensFacing::Front);
        let overlay = Size::new(480.0, 640.0);
        let out = transform_box(&Rect::new(40.0, 100.0, 140.0, 300.0), &g, overlay).unwrap();
        assert_rect_eq(out, Rect::new(340.0, 100.0, 440.0, 300.0));
    }

    #[test]
    fn test_mirroring_reflects_about_center() {
        let overlay = Size::new(960.0, 1280.0);
        let bbox = Rect::new(40.0, 100.0, 200.0, 300.0);
        let back = transform_box(
            &bbox,
            &geometry(640, 480, Rotation::Deg270, LensFacing::Back),
            overlay,
        )
        .unwrap();
        let front = transform_box(
            &bbox,
            &geometry(640, 480, Rotation::Deg270, LensFacing::Front),
            overlay,
        )
        .unwrap();

        // scale_x * effective_width == overlay width
        assert_relative_eq!(front.left, overlay.width - back.right, epsilon = 1e-3);
        assert_relative_eq!(front.right, overlay.width - back.left, epsilon = 1e-3);
        assert_relative_eq!(front.top, back.top);
        assert_relative_eq!(front.bottom, back.bottom);
        assert_relative_eq!(front.width(), back.width(), epsilon = 1e-3);
    }

    #[test]
    fn test_inverse_scaling_recovers_original() {
        let g = geometry(1280, 720, Rotation::Deg90, LensFacing::Back);
        let overlay = Size::new(1080.0, 1920.0);
        let bbox = Rect::new(12.5, 33.0, 301.0, 700.0);
        let out = transform_box(&bbox, &g, overlay).unwrap();

        let eff = g.effective_size_f32();
        let sx = overlay.width / eff.width;
        let sy = overlay.height / eff.height;
        let recovered = Rect::new(out.left / sx, out.top / sy, out.right / sx, out.bottom / sy);
        assert_rect_eq(recovered, bbox);
    }

    #[test]
    fn test_keeps_tracking_id() {
        let g = geometry(640, 480, Rotation::Deg0, LensFacing::Back);
        let face = DetectedFace::new(Some(42), Rect::new(0.0, 0.0, 64.0, 48.0));
        let bounds = to_face_bounds(&face, &g, Size::new(640.0, 480.0)).unwrap();
        assert_eq!(bounds.tracking_id, Some(42));
        assert_rect_eq(bounds.bounds, face.bounding_box);
    }

    #[rstest]
    #[case::zero_width(0, 480, Rotation::Deg0)]
    #[case::zero_height(640, 0, Rotation::Deg0)]
    #[case::zero_after_swap(0, 480, Rotation::Deg90)]
    fn test_zero_dimensions_are_invalid(
        #[case] width: u32,
        #[case] height: u32,
        #[case] rotation: Rotation,
    ) {
        let g = geometry(width, height, rotation, LensFacing::Front);
        let result = transform_box(
            &Rect::new(0.0, 0.0, 10.0, 10.0),
            &g,
            Size::new(100.0, 100.0),
        );
        assert!(matches!(result, Err(EngineError::InvalidGeometry { .. })));
    }
}
