/// Bounding box of an element relative to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }
}

/// Size of the visible viewport
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

/// How `scroll_into_view` moves the page. The target is always centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    /// Animate the scroll; a scroll-end signal follows once it settles
    pub smooth: bool,
}

impl ScrollOptions {
    /// Smooth scroll that centers the target on both axes
    pub fn centered_smooth() -> Self {
        Self { smooth: true }
    }
}

/// The narrow slice of a rendering environment the navigator needs.
///
/// Implementations are driven from a single UI thread, so every method takes
/// `&self` and mutates through interior mutability, like a DOM handle would.
pub trait DocumentAdapter {
    type Element: Clone + 'static;

    fn resolve_element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn bounding_box(&self, element: &Self::Element) -> Rect;

    fn viewport_size(&self) -> ViewportSize;

    /// Start scrolling `element` into view. Smooth scrolls finish later and
    /// are followed by a scroll-end signal on the event loop.
    fn scroll_into_view(&self, element: &Self::Element, options: ScrollOptions);

    fn add_class(&self, element: &Self::Element, class: &str);

    /// Removing a class that is not present does nothing
    fn remove_class(&self, element: &Self::Element, class: &str);
}
