pub mod adapter;
pub mod event_loop;
pub mod layout;
mod navigator;
mod viewport;

pub use adapter::{DocumentAdapter, Rect, ScrollOptions, ViewportSize};
pub use event_loop::{EventLoop, TaskId, TokioEventLoop};
pub use layout::{PageLayout, SimulatedPage};
pub use navigator::{
    ClickEvent, HighlightClock, HighlightOptions, ScrollNavigator, ScrollTarget, DEFAULT_HIGHLIGHT_CLASS,
    DEFAULT_HIGHLIGHT_DURATION,
};
pub use viewport::{element_is_fully_visible, is_fully_visible};
