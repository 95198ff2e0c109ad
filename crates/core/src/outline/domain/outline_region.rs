use crate::shared::geometry::{Rect, Size};

/// Domain interface for the on-screen guide the user must frame their face in.
///
/// Coordinates are in overlay space. The region is fixed for the lifetime
/// of the overlay; the engine only queries it.
pub trait OutlineRegion: Send {
    /// True iff `rect` lies entirely within the region's closed area.
    fn contains(&self, rect: &Rect) -> bool;

    /// Size of the overlay the region is drawn on.
    fn size(&self) -> Size;

    /// Bounding rectangle of the region itself.
    fn bounds(&self) -> Rect;
}
