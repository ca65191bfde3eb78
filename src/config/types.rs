use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::config::deserializers::deserialize_levels;
use crate::document::{InsertMode, Placement};
use crate::navigate::{HighlightClock, HighlightOptions};
use crate::toc::{self, RenderOptions, RequestedLevels};
use crate::utils::error::TocError;

/// Table of contents configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocConfig {
    /// Id of the element containing the headings
    #[serde(default)]
    pub src: Option<String>,

    /// Id of the element the navigation is inserted into
    #[serde(default = "defaults::default_dest")]
    pub dest: String,

    /// Comma-separated heading levels, e.g. `1,2,3`
    #[serde(default = "defaults::default_levels", deserialize_with = "deserialize_levels")]
    pub levels: String,

    /// How the navigation is inserted into the destination
    #[serde(default)]
    pub insert: InsertMode,

    /// Language of the navigation's accessible label
    #[serde(default = "defaults::default_lang")]
    pub lang: String,

    /// Class of the outermost list
    #[serde(default = "defaults::default_base_class")]
    pub base_class: String,

    /// Class of the wrapping navigation element
    #[serde(default = "defaults::default_nav_class")]
    pub nav_class: String,

    /// Class applied to a scroll destination
    #[serde(default = "defaults::default_highlight_class")]
    pub highlight_class: String,

    /// How long the highlight stays on, in milliseconds
    #[serde(default = "defaults::default_highlight_duration_ms")]
    pub highlight_duration_ms: u64,

    /// What the highlight duration is measured from
    #[serde(default)]
    pub highlight_clock: HighlightClock,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            src: None,
            dest: defaults::default_dest(),
            levels: defaults::default_levels(),
            insert: InsertMode::default(),
            lang: defaults::default_lang(),
            base_class: defaults::default_base_class(),
            nav_class: defaults::default_nav_class(),
            highlight_class: defaults::default_highlight_class(),
            highlight_duration_ms: defaults::default_highlight_duration_ms(),
            highlight_clock: HighlightClock::default(),
        }
    }
}

impl TocConfig {
    pub fn requested_levels(&self) -> Result<RequestedLevels, TocError> {
        RequestedLevels::parse(&self.levels)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            base_class: self.base_class.clone(),
            nav_class: self.nav_class.clone(),
            aria_label: toc::translate("toc", &self.lang),
        }
    }

    pub fn placement(&self) -> Placement {
        Placement {
            dest: self.dest.clone(),
            insert: self.insert,
            render: self.render_options(),
        }
    }

    pub fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            class: self.highlight_class.clone(),
            duration: Duration::from_millis(self.highlight_duration_ms),
            clock: self.highlight_clock,
        }
    }
}
