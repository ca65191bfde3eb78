use std::collections::HashSet;
use std::ops::Range;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::toc::{HeadingDescriptor, RawHeading, RequestedLevels};

lazy_static! {
    static ref OPEN_TAG_REGEX: Regex =
        Regex::new(r"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s[^>]*)?)>").unwrap();

    static ref HEADING_REGEX: Regex =
        Regex::new(r"(?is)<h([1-6])((?:\s[^>]*)?)>(.*?)</h([1-6])\s*>").unwrap();

    static ref ID_ATTR_REGEX: Regex =
        Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#).unwrap();

    static ref DATA_LVL_ATTR_REGEX: Regex =
        Regex::new(r#"(?i)\sdata-lvl\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>/]+)"#).unwrap();

    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();

    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Where the rendered navigation goes inside its destination element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InsertMode {
    /// After the destination's existing children
    #[default]
    Append,
    /// Before the destination's existing children
    Prepend,
    /// In place of the destination's children
    Replace,
}

/// Byte ranges of one element inside the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpan {
    pub tag: String,
    pub open: Range<usize>,
    pub inner: Range<usize>,
    pub close: Range<usize>,
}

/// A heading found inside a container, with the location of its opening tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedHeading {
    pub heading: RawHeading,
    pub open_tag: Range<usize>,
    attrs: String,
}

/// An HTML document that headings are read from and written back to
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    html: String,
}

impl HtmlDocument {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    /// Locate the element carrying `id`, including its matching closing tag
    pub fn find_element_by_id(&self, id: &str) -> Option<ElementSpan> {
        for caps in OPEN_TAG_REGEX.captures_iter(&self.html) {
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            if attr_id(attrs).as_deref() != Some(id) {
                continue;
            }

            let whole = caps.get(0)?;
            let tag = caps.get(1)?.as_str().to_string();
            let open = whole.range();

            if attrs.trim_end().ends_with('/') {
                return Some(ElementSpan {
                    tag,
                    inner: open.end..open.end,
                    close: open.end..open.end,
                    open,
                });
            }

            let (inner, close) = self.match_closing_tag(&tag, open.end)?;
            return Some(ElementSpan { tag, open, inner, close });
        }

        None
    }

    fn match_closing_tag(&self, tag: &str, from: usize) -> Option<(Range<usize>, Range<usize>)> {
        let pattern = format!(r"(?i)<(/?){}((?:\s[^>]*)?)>", regex::escape(tag));
        let tag_regex = Regex::new(&pattern).ok()?;
        let mut depth = 1usize;

        for caps in tag_regex.captures_iter(&self.html[from..]) {
            let whole = caps.get(0)?;
            let closing = caps.get(1).map(|m| !m.as_str().is_empty()).unwrap_or(false);
            let self_closing = caps
                .get(2)
                .map(|m| m.as_str().trim_end().ends_with('/'))
                .unwrap_or(false);

            if closing {
                depth -= 1;
                if depth == 0 {
                    let close = (from + whole.start())..(from + whole.end());
                    return Some((from..close.start, close));
                }
            } else if !self_closing {
                depth += 1;
            }
        }

        // Unclosed element: its content runs to the end of the document
        debug!("No closing tag for <{}>, treating the rest of the document as its content", tag);
        let end = self.html.len();
        Some((from..end, end..end))
    }

    /// Headings of the requested levels inside `container`, in document order
    pub fn headings_in(&self, container: &ElementSpan, levels: &RequestedLevels) -> Vec<ScannedHeading> {
        let offset = container.inner.start;
        let inner = &self.html[container.inner.clone()];
        let mut headings = Vec::new();

        for caps in HEADING_REGEX.captures_iter(inner) {
            let (whole, open_level, attrs, body, close_level) = match (
                caps.get(0),
                caps.get(1),
                caps.get(2),
                caps.get(3),
                caps.get(4),
            ) {
                (Some(w), Some(o), Some(a), Some(b), Some(c)) => (w, o, a, b, c),
                _ => continue,
            };

            if open_level.as_str() != close_level.as_str() {
                debug!("Skipping heading with mismatched tags: {}", whole.as_str());
                continue;
            }

            let level: u8 = match open_level.as_str().parse() {
                Ok(level) => level,
                Err(_) => continue,
            };
            if !levels.contains(level) {
                continue;
            }

            headings.push(ScannedHeading {
                heading: RawHeading {
                    level,
                    authored_id: attr_id(attrs.as_str()),
                    text: heading_text(body.as_str()),
                },
                open_tag: (offset + whole.start())..(offset + attrs.end() + 1),
                attrs: attrs.as_str().to_string(),
            });
        }

        headings
    }

    /// Every `id` attribute value present in the document
    pub fn authored_ids(&self) -> HashSet<String> {
        OPEN_TAG_REGEX
            .captures_iter(&self.html)
            .filter_map(|caps| caps.get(2).and_then(|attrs| attr_id(attrs.as_str())))
            .collect()
    }

    /// Write `id` (when generated) and `data-lvl` onto each heading's opening tag
    pub fn annotate_headings(&mut self, scanned: &[ScannedHeading], indexed: &[HeadingDescriptor]) {
        let mut edits: Vec<(Range<usize>, String)> = scanned
            .iter()
            .zip(indexed.iter())
            .map(|(found, heading)| {
                // A blank or padded authored id is replaced by the indexed one
                let rewrite_id = found.heading.authored_id.as_deref() != Some(heading.id.as_str());
                let attrs = DATA_LVL_ATTR_REGEX.replace_all(&found.attrs, "");
                let attrs = if rewrite_id {
                    ID_ATTR_REGEX.replace_all(&attrs, "").into_owned()
                } else {
                    attrs.into_owned()
                };
                let attrs = attrs.trim_end().trim_end_matches('/').trim_end();
                let id_attr = if rewrite_id {
                    format!(" id=\"{}\"", html_escape::encode_double_quoted_attribute(&heading.id))
                } else {
                    String::new()
                };
                let tag = format!("<h{}{}{} data-lvl=\"{}\">", heading.level, attrs, id_attr, heading.level);
                (found.open_tag.clone(), tag)
            })
            .collect();

        // Back to front so earlier ranges stay valid
        edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
        for (range, tag) in edits {
            self.html.replace_range(range, &tag);
        }
    }

    /// Insert markup into the element carrying `dest_id`. Returns false if absent.
    pub fn insert_into(&mut self, dest_id: &str, markup: &str, mode: InsertMode) -> bool {
        let span = match self.find_element_by_id(dest_id) {
            Some(span) => span,
            None => return false,
        };

        match mode {
            InsertMode::Append => self.html.insert_str(span.inner.end, markup),
            InsertMode::Prepend => self.html.insert_str(span.inner.start, markup),
            InsertMode::Replace => self.html.replace_range(span.inner, markup),
        }
        true
    }
}

fn attr_id(attrs: &str) -> Option<String> {
    let caps = ID_ATTR_REGEX.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| html_escape::decode_html_entities(m.as_str()).to_string())
}

/// Plain text of a heading body: tags stripped, entities decoded, whitespace collapsed
fn heading_text(body: &str) -> String {
    let stripped = TAG_REGEX.replace_all(body, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").to_string()
}
