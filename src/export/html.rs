//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Converts a note body from markdown to HTML.
///
/// The body is trimmed first. Tables, footnotes, strikethrough, and task lists
/// are enabled.
///
/// # Example
///
/// ```
/// use quill::export::markdown_to_html;
///
/// let html = markdown_to_html("\n# Hello\n\nWorld\n");
/// assert!(html.contains("<h1>Hello</h1>"));
/// assert!(html.contains("<p>World</p>"));
/// ```
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown.trim(), options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
