use comrak::Options;

/// Create ComrakOptions with GitHub Flavored Markdown settings.
///
/// Header ids are left off: headings get their ids from the table of contents
/// indexer, and raw HTML passes through so destination elements survive.
pub fn create_comrak_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    // Extension options - GitHub Flavored Markdown
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.header_ids = None;

    // Render options
    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true;

    options
}

/// Render markdown to HTML using Comrak
pub fn render_markdown<'a>(content: &str, options: &Options<'a>) -> String {
    comrak::markdown_to_html(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comrak_rendering() {
        let options = create_comrak_options();
        let markdown = "# Hello, World!\n\n<div id=\"toc-content\"></div>\n\n## Next";
        let html = render_markdown(markdown, &options);

        assert!(html.contains("<h1>Hello, World!</h1>"));
        assert!(html.contains("<h2>Next</h2>"));
        assert!(html.contains("<div id=\"toc-content\"></div>"));
    }
}
