/// A heading that has been indexed and carries a stable identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingDescriptor {
    pub id: String,
    pub level: u8,
    pub text: String,
    /// Position among the headings of the source container
    pub document_order: usize,
    /// Whether `id` was generated rather than authored
    pub generated: bool,
}

/// Leaf entry of the table of contents pointing at one heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub heading_id: String,
    pub level: u8,
    pub label: String,
}

impl ListItem {
    /// Anchor target for this item, e.g. `#intro`
    pub fn href(&self) -> String {
        format!("#{}", self.heading_id)
    }
}

impl From<&HeadingDescriptor> for ListItem {
    fn from(heading: &HeadingDescriptor) -> Self {
        Self {
            heading_id: heading.id.clone(),
            level: heading.level,
            label: heading.text.clone(),
        }
    }
}

/// A child of a list tier: either an item or a deeper tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    Item(ListItem),
    List(ListNode),
}

/// One nesting tier of the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub level: u8,
    pub children: Vec<ListEntry>,
}

impl ListNode {
    pub fn new(level: u8) -> Self {
        Self {
            level,
            children: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Items placed directly in this tier
    pub fn direct_items(&self) -> Vec<&ListItem> {
        self.children
            .iter()
            .filter_map(|entry| match entry {
                ListEntry::Item(item) => Some(item),
                ListEntry::List(_) => None,
            })
            .collect()
    }

    /// Tiers nested directly in this tier
    pub fn sublists(&self) -> Vec<&ListNode> {
        self.children
            .iter()
            .filter_map(|entry| match entry {
                ListEntry::List(list) => Some(list),
                ListEntry::Item(_) => None,
            })
            .collect()
    }

    /// All items of the tree in document order
    pub fn items(&self) -> Vec<&ListItem> {
        let mut items = Vec::new();
        self.collect_items(&mut items);
        items
    }

    fn collect_items<'a>(&'a self, items: &mut Vec<&'a ListItem>) {
        for entry in &self.children {
            match entry {
                ListEntry::Item(item) => items.push(item),
                ListEntry::List(list) => list.collect_items(items),
            }
        }
    }

    /// Number of tiers below this one along the deepest path
    pub fn depth(&self) -> usize {
        self.sublists()
            .iter()
            .map(|list| list.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, level: u8) -> ListEntry {
        ListEntry::Item(ListItem {
            heading_id: id.to_string(),
            level,
            label: id.to_uppercase(),
        })
    }

    #[test]
    fn test_items_in_document_order() {
        let mut nested = ListNode::new(2);
        nested.children.push(item("b", 2));
        let mut root = ListNode::new(1);
        root.children.push(item("a", 1));
        root.children.push(ListEntry::List(nested));
        root.children.push(item("c", 1));

        let ids: Vec<&str> = root.items().iter().map(|i| i.heading_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(root.direct_items().len(), 2);
        assert_eq!(root.depth(), 1);
    }

    #[test]
    fn test_href() {
        let item = ListItem {
            heading_id: "h2-3".to_string(),
            level: 2,
            label: "Setup".to_string(),
        };
        assert_eq!(item.href(), "#h2-3");
    }
}
