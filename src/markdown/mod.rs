pub mod engine;

use html_escape::encode_double_quoted_attribute;

pub use engine::{create_comrak_options, render_markdown};

/// Render a Markdown source into an HTML document whose content sits in an
/// `<article>` carrying `container_id`, so its headings can be indexed.
pub fn markdown_to_document(markdown: &str, container_id: &str) -> String {
    let options = create_comrak_options();
    let body = render_markdown(markdown, &options);
    format!(
        "<article id=\"{}\">\n{}</article>\n",
        encode_double_quoted_attribute(container_id),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_document() {
        let html = markdown_to_document("# Title\n\nText\n\n## Part", "content");
        assert!(html.starts_with("<article id=\"content\">\n<h1>Title</h1>"));
        assert!(html.contains("<h2>Part</h2>"));
        assert!(html.ends_with("</article>\n"));
    }
}
