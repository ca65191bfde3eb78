use crate::navigate::adapter::{DocumentAdapter, Rect, ViewportSize};

/// True iff `rect` lies entirely within `[0, width] x [0, height]`
pub fn is_fully_visible(rect: &Rect, viewport: ViewportSize) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= viewport.height
        && rect.right <= viewport.width
}

/// Whether an element of the document is fully inside the viewport
pub fn element_is_fully_visible<D: DocumentAdapter>(document: &D, element: &D::Element) -> bool {
    is_fully_visible(&document.bounding_box(element), document.viewport_size())
}
