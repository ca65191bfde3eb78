use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::toc::types::{ListEntry, ListNode};

/// Options for turning a table of contents tree into markup
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Class of the outermost list
    pub base_class: String,
    /// Class of the wrapping `<nav>` element
    pub nav_class: String,
    /// Accessible label of the wrapping `<nav>` element
    pub aria_label: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_class: "content".to_string(),
            nav_class: "nav-toc".to_string(),
            aria_label: "Inhaltsverzeichnis".to_string(),
        }
    }
}

/// Render the list tree. Nested tiers sit directly inside their parent list.
pub fn render_list(root: &ListNode, options: &RenderOptions) -> String {
    let mut html = String::new();
    render_node(root, Some(&options.base_class), &mut html);
    html
}

/// Render the list tree wrapped in a navigation landmark
pub fn render_nav(root: &ListNode, options: &RenderOptions) -> String {
    format!(
        "<nav class=\"{}\" role=\"navigation\" aria-label=\"{}\">\n{}</nav>",
        encode_double_quoted_attribute(&options.nav_class),
        encode_double_quoted_attribute(&options.aria_label),
        render_list(root, options)
    )
}

fn render_node(node: &ListNode, base_class: Option<&str>, html: &mut String) {
    let class = match base_class {
        Some(class) => class.to_string(),
        None => format!("lvl-{}", node.level),
    };
    html.push_str(&format!("<ul class=\"{}\">\n", encode_double_quoted_attribute(&class)));

    for entry in &node.children {
        match entry {
            ListEntry::Item(item) => {
                html.push_str(&format!(
                    "<li data-lvl=\"{}\"><a href=\"{}\">{}</a></li>\n",
                    item.level,
                    encode_double_quoted_attribute(&item.href()),
                    encode_text(&item.label)
                ));
            }
            ListEntry::List(list) => render_node(list, None, html),
        }
    }

    html.push_str("</ul>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::types::ListItem;

    fn item(id: &str, level: u8, label: &str) -> ListEntry {
        ListEntry::Item(ListItem {
            heading_id: id.to_string(),
            level,
            label: label.to_string(),
        })
    }

    #[test]
    fn test_render_nested_list() {
        let mut nested = ListNode::new(2);
        nested.children.push(item("h2-1", 2, "Setup"));
        let mut root = ListNode::new(1);
        root.children.push(item("intro", 1, "Intro"));
        root.children.push(ListEntry::List(nested));

        let html = render_list(&root, &RenderOptions::default());
        assert_eq!(
            html,
            "<ul class=\"content\">\n\
             <li data-lvl=\"1\"><a href=\"#intro\">Intro</a></li>\n\
             <ul class=\"lvl-2\">\n\
             <li data-lvl=\"2\"><a href=\"#h2-1\">Setup</a></li>\n\
             </ul>\n\
             </ul>\n"
        );
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut root = ListNode::new(1);
        root.children.push(item("a", 1, "Fish & <Chips>"));

        let html = render_list(&root, &RenderOptions::default());
        assert!(html.contains(">Fish &amp; &lt;Chips&gt;</a>"));
    }

    #[test]
    fn test_empty_list_still_renders() {
        let html = render_list(&ListNode::new(1), &RenderOptions::default());
        assert_eq!(html, "<ul class=\"content\">\n</ul>\n");
    }

    #[test]
    fn test_nav_wrapper() {
        let options = RenderOptions {
            aria_label: "Table Of Contents".to_string(),
            ..RenderOptions::default()
        };
        let html = render_nav(&ListNode::new(1), &options);
        assert!(html.starts_with(
            "<nav class=\"nav-toc\" role=\"navigation\" aria-label=\"Table Of Contents\">"
        ));
        assert!(html.ends_with("</ul>\n</nav>"));
    }
}
