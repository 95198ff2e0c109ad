use serde::{Deserialize, Serialize};

use crate::outline::domain::outline_region::OutlineRegion;
use crate::shared::geometry::Size;

use super::oval_outline::OvalOutline;
use super::rect_outline::RectOutline;

/// Outline shape preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineShape {
    Oval,
    Rect,
}

impl std::str::FromStr for OutlineShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oval" | "ellipse" => Ok(OutlineShape::Oval),
            "rect" | "rectangle" => Ok(OutlineShape::Rect),
            other => Err(format!("unknown outline shape: {other}")),
        }
    }
}

/// Creates a `width` x `height` outline of the given shape, centered in
/// the overlay.
pub fn create_outline(
    shape: OutlineShape,
    overlay: Size,
    width: f32,
    height: f32,
) -> Box<dyn OutlineRegion> {
    log::debug!(
        "Outline {:?} {}x{} in overlay {}x{}",
        shape,
        width,
        height,
        overlay.width,
        overlay.height
    );
    match shape {
        OutlineShape::Oval => Box::new(OvalOutline::centered(overlay, width, height)),
        OutlineShape::Rect => Box::new(RectOutline::centered(overlay, width, height)),
    }
}
