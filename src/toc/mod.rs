mod builder;
mod indexer;
mod labels;
mod levels;
mod render;
mod types;

pub use builder::build_toc;
pub use indexer::{index_headings, RawHeading};
pub use labels::{is_supported_lang, translate};
pub use levels::RequestedLevels;
pub use render::{render_list, render_nav, RenderOptions};
pub use types::{HeadingDescriptor, ListEntry, ListItem, ListNode};
