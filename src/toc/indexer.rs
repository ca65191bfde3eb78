use std::collections::HashSet;
use log::{debug, warn};

use crate::toc::types::HeadingDescriptor;

/// A heading as found in the source container, before indexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeading {
    pub level: u8,
    pub authored_id: Option<String>,
    pub text: String,
}

impl RawHeading {
    pub fn new(level: u8, authored_id: Option<&str>, text: &str) -> Self {
        Self {
            level,
            authored_id: authored_id.map(str::to_string),
            text: text.to_string(),
        }
    }
}

/// Assign a stable identifier to every heading.
///
/// Authored identifiers are kept as they are. Headings without one get
/// `h{level}-{index}`, where `index` is the heading's position in `headings`.
/// `reserved` holds every identifier already present in the document; a
/// generated identifier that would clash with one of them (or with an earlier
/// generated one) gets a numeric suffix instead.
pub fn index_headings(headings: &[RawHeading], reserved: &HashSet<String>) -> Vec<HeadingDescriptor> {
    let mut used: HashSet<String> = reserved.clone();
    let mut authored: HashSet<&str> = HashSet::new();

    // Authored ids win over anything generated, wherever they appear
    for heading in headings {
        if let Some(id) = authored_id(heading) {
            if !authored.insert(id) {
                warn!("Duplicate heading id '{}' in source; leaving it unchanged", id);
            }
            used.insert(id.to_string());
        }
    }

    headings
        .iter()
        .enumerate()
        .map(|(index, heading)| match authored_id(heading) {
            Some(id) => HeadingDescriptor {
                id: id.to_string(),
                level: heading.level,
                text: heading.text.clone(),
                document_order: index,
                generated: false,
            },
            None => {
                let id = unique_id(&format!("h{}-{}", heading.level, index), &used);
                debug!("Assigned id '{}' to heading '{}'", id, heading.text);
                used.insert(id.clone());
                HeadingDescriptor {
                    id,
                    level: heading.level,
                    text: heading.text.clone(),
                    document_order: index,
                    generated: true,
                }
            }
        })
        .collect()
}

fn authored_id(heading: &RawHeading) -> Option<&str> {
    heading
        .authored_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn unique_id(candidate: &str, used: &HashSet<String>) -> String {
    if !used.contains(candidate) {
        return candidate.to_string();
    }

    let mut suffix = 1;
    loop {
        let id = format!("{}-{}", candidate, suffix);
        if !used.contains(&id) {
            return id;
        }
        suffix += 1;
    }
}
