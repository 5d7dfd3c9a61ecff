//! Output-time sanitization of free-text bookmark fields.
//!
//! Stored records are kept exactly as submitted; every record leaving the
//! service goes through [`sanitize_bookmark`]. Only `title` and `description`
//! are touched.
//!
//! Tags on the allow-list survive with their allowed attributes, everything
//! else that looks like markup is entity-encoded so that a browser renders it
//! as text. Ampersands and quotes in text are left alone, which makes the
//! transformation idempotent.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::model::Bookmark;

lazy_static! {
    /// An opening or closing tag. Quoted attribute values may contain `>`.
    static ref TAG_PATTERN: Regex =
        Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^<>"']|"[^"]*"|'[^']*')*)>"#).unwrap();

    /// A single attribute, with an optional double, single or unquoted value.
    static ref ATTR_PATTERN: Regex = Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    )
    .unwrap();

    /// A numeric or named character reference; the trailing `;` is optional in browsers.
    static ref CHAR_REF_PATTERN: Regex = Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[A-Za-z][A-Za-z0-9]*);?").unwrap();
}

const URL_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        "abbr" => &["title"],
        "blockquote" | "q" | "del" | "ins" => &["cite"],
        "td" | "th" => &["colspan", "rowspan", "align"],
        "b" | "i" | "u" | "s" | "em" | "strong" | "small" | "mark" | "sub" | "sup" | "code" | "pre" | "kbd"
        | "br" | "hr" | "p" | "span" | "div" | "ul" | "ol" | "li" | "dl" | "dt" | "dd" | "h1" | "h2" | "h3"
        | "h4" | "h5" | "h6" | "table" | "thead" | "tbody" | "tfoot" | "tr" | "caption" | "cite" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Escape markup delimiters in text that is not part of an allowed tag.
pub fn escape_text(value: &str) -> String {
    value.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr_value(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn named_char(name: &str) -> Option<char> {
    let c = match name {
        "colon" => ':',
        "Tab" => '\t',
        "NewLine" => '\n',
        "amp" | "AMP" => '&',
        "sol" => '/',
        "quest" => '?',
        "num" => '#',
        "period" => '.',
        "lpar" => '(',
        "rpar" => ')',
        "quot" | "QUOT" => '"',
        "apos" => '\'',
        "lt" | "LT" => '<',
        "gt" | "GT" => '>',
        _ => return None,
    };
    Some(c)
}

/// Decode the character references a browser would resolve inside an attribute value.
/// Unknown references are left as written.
fn decode_char_refs(value: &str) -> String {
    CHAR_REF_PATTERN
        .replace_all(value, |caps: &Captures| {
            let reference = &caps[1];
            let decoded = match reference.strip_prefix('#') {
                Some(num) => match num.strip_prefix(|c: char| c == 'x' || c == 'X') {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse::<u32>().ok(),
                }
                .and_then(char::from_u32),
                None => named_char(reference),
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Whether a `href`/`src` value is safe to hand to a browser.
fn is_safe_url(value: &str) -> bool {
    let compact: String = decode_char_refs(value)
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    if URL_SCHEMES.iter().any(|s| compact.starts_with(s)) {
        return true;
    }
    if compact.starts_with('#') || compact.starts_with('/') || compact.starts_with('.') {
        return true;
    }

    // relative reference: nothing scheme-like before the first path, query or fragment delimiter
    let head_end = compact.find(|c: char| matches!(c, '/' | '?' | '#')).unwrap_or(compact.len());
    let head = &compact[..head_end];
    !head.contains(':') && !head.contains('&')
}

fn rebuild_tag(closing: bool, name: &str, rest: &str, allowed: &[&str]) -> String {
    let mut out = String::with_capacity(rest.len() + name.len() + 3);
    out.push('<');
    if closing {
        out.push('/');
        out.push_str(name);
        out.push('>');
        return out;
    }
    out.push_str(name);

    let trimmed = rest.trim_end();
    let (attrs, self_closing) = match trimmed.strip_suffix('/') {
        Some(head) if head.is_empty() || head.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'') => {
            (head, true)
        }
        _ => (trimmed, false),
    };

    for caps in ATTR_PATTERN.captures_iter(attrs) {
        let attr = caps[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)).map(|m| m.as_str());
        match value {
            Some(v) => {
                if (attr == "href" || attr == "src") && !is_safe_url(v) {
                    continue;
                }
                out.push_str(&format!(" {}=\"{}\"", attr, escape_attr_value(v)));
            }
            None => {
                out.push(' ');
                out.push_str(&attr);
            }
        }
    }

    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

fn sanitize_tag(caps: &Captures) -> String {
    let closing = !caps[1].is_empty();
    let name = &caps[2];
    match allowed_attributes(&name.to_ascii_lowercase()) {
        Some(allowed) => rebuild_tag(closing, name, &caps[3], allowed),
        None => escape_text(&caps[0]),
    }
}

/// Neutralize script-capable markup in a free-text value.
pub fn sanitize_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for caps in TAG_PATTERN.captures_iter(input) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&escape_text(&input[last..whole.start()]));
        output.push_str(&sanitize_tag(&caps));
        last = whole.end();
    }
    output.push_str(&escape_text(&input[last..]));

    output
}

pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: sanitize_html(&bookmark.title),
        description: sanitize_html(&bookmark.description),
        ..bookmark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_tag_is_encoded() {
        assert_eq!(
            sanitize_html(r#"This is a very dangerous <script>alert("xss");</script>"#),
            r#"This is a very dangerous &lt;script&gt;alert("xss");&lt;/script&gt;"#
        );
    }

    #[test]
    fn test_event_handler_is_stripped() {
        let input = r#"Bad image <img src="https://url.to.file.which/does-not.exist" onerror="alert(document.cookie);">. But not <strong>all</strong> bad."#;
        let expected = r#"Bad image <img src="https://url.to.file.which/does-not.exist">. But not <strong>all</strong> bad."#;
        assert_eq!(sanitize_html(input), expected);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r#"This is a very dangerous <script>alert("xss");</script>"#,
            r#"Bad image <img src="x.png" onerror="alert(1)">. <strong>ok</strong>"#,
            "plain & simple",
            "a < b > c",
            r#"<a href='/docs?q="x"' onclick="steal()">docs</a>"#,
            "<br/> and <br />",
        ];
        for input in inputs {
            let once = sanitize_html(input);
            assert_eq!(sanitize_html(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(sanitize_html("Think outside the classroom"), "Think outside the classroom");
        assert_eq!(sanitize_html("Tom & Jerry's \"show\""), "Tom & Jerry's \"show\"");
    }

    #[test]
    fn test_javascript_urls_dropped() {
        assert_eq!(sanitize_html(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="java&#09;script:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="javascript&colon;alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="javascript&#58;alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="javascript&#0058alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html("<img src=javascript&#x3a;alert(1)>"), "<img>");
        assert_eq!(sanitize_html(r#"<a href="java&Tab;script&NewLine;:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="javascript&unknown;:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(sanitize_html(r#"<a href="&#106;avascript&#58;alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(
            sanitize_html(r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#),
            r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#
        );
        assert_eq!(sanitize_html(r#"<a href="docs/page.html">x</a>"#), r#"<a href="docs/page.html">x</a>"#);
        assert_eq!(
            sanitize_html(r#"<a href="https://example.com" target="_blank">x</a>"#),
            r#"<a href="https://example.com" target="_blank">x</a>"#
        );
        assert_eq!(sanitize_html(r#"<img src="/a.png">"#), r#"<img src="/a.png">"#);
    }

    #[test]
    fn test_unknown_tags_and_attributes() {
        assert_eq!(
            sanitize_html(r#"<iframe src="https://evil"></iframe>"#),
            r#"&lt;iframe src="https://evil"&gt;&lt;/iframe&gt;"#
        );
        assert_eq!(sanitize_html(r#"<p style="color:red" class="x">hi</p>"#), "<p>hi</p>");
        assert_eq!(sanitize_html("<br/>"), "<br />");
    }

    #[test]
    fn test_sanitize_bookmark_leaves_url_and_rating() {
        let bookmark = Bookmark {
            id: 911,
            title: "<script>x</script>".to_string(),
            url: "https://bad.site.co.uk/<script>".to_string(),
            description: String::new(),
            rating: 1,
        };
        let clean = sanitize_bookmark(bookmark);
        assert_eq!(clean.title, "&lt;script&gt;x&lt;/script&gt;");
        assert_eq!(clean.url, "https://bad.site.co.uk/<script>");
        assert_eq!(clean.rating, 1);
        assert_eq!(clean.id, 911);
    }
}
