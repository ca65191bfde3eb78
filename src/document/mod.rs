mod html;

pub use html::{ElementSpan, HtmlDocument, InsertMode, ScannedHeading};

use log::{debug, info};

use crate::toc::{self, HeadingDescriptor, ListNode, RawHeading, RenderOptions, RequestedLevels};
use crate::utils::error::TocError;

/// Table of contents built from a document's source container
#[derive(Debug, Clone)]
pub struct DocumentToc {
    pub root: ListNode,
    pub headings: Vec<HeadingDescriptor>,
}

/// Result of rendering a table of contents into a document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// The document with annotated headings and the inserted navigation
    pub html: String,
    /// The navigation markup on its own
    pub nav: String,
    /// Whether the destination element was found and received the list.
    /// Otherwise the `<nav>` was prepended to the source container.
    pub inserted: bool,
    pub toc: DocumentToc,
}

/// Where and how the navigation is placed in a document
#[derive(Debug, Clone)]
pub struct Placement {
    pub dest: String,
    pub insert: InsertMode,
    pub render: RenderOptions,
}

/// Index the headings of the source container and build their table of contents.
///
/// Headings are only annotated in place once the whole list has been built,
/// so a failed build leaves the document untouched.
pub fn build_document_toc(
    doc: &mut HtmlDocument,
    src: Option<&str>,
    levels: &RequestedLevels,
) -> Result<DocumentToc, TocError> {
    let src = src
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| TocError::MissingSource("no source container configured".to_string()))?;

    let container = doc
        .find_element_by_id(src)
        .ok_or_else(|| TocError::MissingSource(src.to_string()))?;

    let scanned = doc.headings_in(&container, levels);
    debug!("Found {} headings for levels {} in #{}", scanned.len(), levels, src);

    let raw: Vec<RawHeading> = scanned.iter().map(|s| s.heading.clone()).collect();
    let headings = toc::index_headings(&raw, &doc.authored_ids());
    let root = toc::build_toc(&headings, levels)?;

    doc.annotate_headings(&scanned, &headings);
    Ok(DocumentToc { root, headings })
}

/// Build the table of contents and insert it into the destination element
pub fn render_document(
    html: &str,
    src: Option<&str>,
    levels: &RequestedLevels,
    placement: &Placement,
) -> Result<RenderedDocument, TocError> {
    let mut doc = HtmlDocument::new(html);
    let toc = build_document_toc(&mut doc, src, levels)?;

    let list = toc::render_list(&toc.root, &placement.render);
    let nav = toc::render_nav(&toc.root, &placement.render);
    let inserted = doc.insert_into(&placement.dest, &list, placement.insert);

    if inserted {
        info!("Inserted table of contents with {} entries into #{}", toc.headings.len(), placement.dest);
    } else if let Some(src) = src {
        // Without a destination the navigation heads the source container
        doc.insert_into(src, &format!("{}\n", nav), InsertMode::Prepend);
        info!("Destination #{} not found; navigation placed at the top of #{}", placement.dest, src);
    }

    Ok(RenderedDocument {
        html: doc.into_string(),
        nav,
        inserted,
        toc,
    })
}
