//! Attribute escaping and the fixed HTML layout applied to outgoing email.
//!
//! The layout is a three-part skeleton: an opening fragment with a centered
//! 600px container, an optional centered logo block, and a closing fragment.
//! The original message body is embedded between the fragments verbatim,
//! byte for byte.

/// Replacement header declaring the wrapped message as HTML.
pub const HTML_CONTENT_TYPE: &str = "Content-Type: text/html; charset=UTF-8";

const LAYOUT_OPEN: &str =
    "<html>\n<body>\n<div style=\"margin:0 auto;max-width:600px;padding:20px;\">\n";

const CONTENT_OPEN: &str = "<div style=\"text-align:center;margin-top:60px;\">\n<div>";

const LAYOUT_CLOSE: &str = "</div>\n</div>\n</div>\n</body>\n</html>";

/// Escapes a string for use inside a double- or single-quoted HTML
/// attribute value.
///
/// Encodes the five characters that can terminate an attribute context or
/// open a new tag (`&`, `<`, `>`, `"`, `'`). Always succeeds for arbitrary
/// input; everything else is passed through unchanged.
///
/// # Examples
///
/// ```rust
/// assert_eq!(
///     letterhead::escape_attr(r#"https://x.com/a"onerror="alert(1)"#),
///     "https://x.com/a&quot;onerror=&quot;alert(1)"
/// );
/// ```
///
/// Plain URLs come back unchanged:
///
/// ```rust
/// assert_eq!(
///     letterhead::escape_attr("https://example.com/logo.png"),
///     "https://example.com/logo.png"
/// );
/// ```
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps a message body in the fixed HTML layout, optionally prefixed with
/// a centered logo image.
///
/// The logo URL is attribute-escaped here; a `None` or empty URL omits the
/// image block entirely. The message itself is embedded unmodified between
/// the opening and closing fragments.
///
/// Pre-computes the exact byte length, allocates once, and writes all parts
/// via `push_str`.
pub fn render_layout(message: &str, logo_url: Option<&str>) -> String {
    let logo_block = logo_url
        .map(escape_attr)
        .filter(|src| !src.is_empty())
        .map(|src| {
            format!(
                "<div style=\"text-align:center;\">\n\
                 <img src=\"{src}\" alt=\"Logo\" style=\"max-width:300px;height:auto;\">\n\
                 </div>\n"
            )
        });

    let capacity = LAYOUT_OPEN.len()
        + logo_block.as_ref().map_or(0, String::len)
        + CONTENT_OPEN.len()
        + message.len()
        + LAYOUT_CLOSE.len();

    let mut html = String::with_capacity(capacity);

    html.push_str(LAYOUT_OPEN);
    if let Some(block) = &logo_block {
        html.push_str(block);
    }
    html.push_str(CONTENT_OPEN);
    html.push_str(message);
    html.push_str(LAYOUT_CLOSE);

    html
}
