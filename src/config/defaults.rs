use crate::navigate::{DEFAULT_HIGHLIGHT_CLASS, DEFAULT_HIGHLIGHT_DURATION};
use crate::toc::RequestedLevels;

/// Default destination element id
pub fn default_dest() -> String {
    "toc-content".to_string()
}

/// Default requested levels
pub fn default_levels() -> String {
    RequestedLevels::default().to_string()
}

/// Default label language
pub fn default_lang() -> String {
    "de".to_string()
}

/// Default class of the outermost list
pub fn default_base_class() -> String {
    "content".to_string()
}

/// Default class of the wrapping navigation element
pub fn default_nav_class() -> String {
    "nav-toc".to_string()
}

/// Default highlight class
pub fn default_highlight_class() -> String {
    DEFAULT_HIGHLIGHT_CLASS.to_string()
}

/// Default highlight duration in milliseconds
pub fn default_highlight_duration_ms() -> u64 {
    DEFAULT_HIGHLIGHT_DURATION.as_millis() as u64
}
