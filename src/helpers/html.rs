//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Length of the body preview used when a post has no excerpt
pub const PREVIEW_CHARS: usize = 100;

/// Clean untrusted post HTML down to an allow-listed subset
///
/// Scripts, event handlers, `style` and unknown tags are removed; links get
/// `rel="noopener noreferrer"`.
pub fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(html)
        .to_string()
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Collapse runs of whitespace into single spaces
pub fn squash_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Truncate a string to a number of characters, appending `omission`
pub fn truncate(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Short plain-text teaser: the excerpt if there is one, otherwise the start
/// of the body followed by `...`
pub fn teaser(excerpt: Option<&str>, body: &str) -> String {
    match excerpt.map(str::trim).filter(|e| !e.is_empty()) {
        Some(excerpt) => excerpt.to_string(),
        None => {
            let text = squash_whitespace(&strip_html(body));
            let preview: String = text.chars().take(PREVIEW_CHARS).collect();
            format!("{}...", preview)
        }
    }
}

/// Escape text for HTML content and quoted attributes
///
/// Unlike Tera's default escaper, `/` is left alone so routes stay readable.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Make serialized JSON safe to embed in a `<script>` element
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_scripts_and_handlers() {
        let dirty = r#"<p onclick="steal()">Hello <script>alert(1)</script><b>World</b></p><a href="https://example.com">link</a>"#;
        let clean = sanitize_html(dirty);
        assert!(!clean.contains("<script"));
        assert!(!clean.contains("onclick"));
        assert!(clean.contains("<b>World</b>"));
        assert!(clean.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_sanitize_drops_javascript_urls() {
        let clean = sanitize_html(r#"<a href="javascript:alert(1)">x</a><img src="x" onerror="bad()">"#);
        assert!(!clean.contains("javascript:"));
        assert!(!clean.contains("onerror"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5, "..."), "Hello...");
        assert_eq!(truncate("Hi", 10, "..."), "Hi");
    }

    #[test]
    fn test_teaser_prefers_excerpt() {
        assert_eq!(teaser(Some("Short summary"), "<p>Body</p>"), "Short summary");
    }

    #[test]
    fn test_teaser_falls_back_to_body() {
        assert_eq!(teaser(None, "<p>Body\n  text</p>"), "Body text...");
        assert_eq!(teaser(Some("  "), "<p>Body</p>"), "Body...");

        let long = "x".repeat(300);
        assert_eq!(teaser(None, &long).len(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="/x?a=1&b='2'">"#),
            "&lt;a href=&quot;/x?a=1&amp;b=&#x27;2&#x27;&quot;&gt;"
        );
    }

    #[test]
    fn test_script_safe_json() {
        assert_eq!(
            script_safe_json(r#"{"headline":"</script><script>"}"#),
            r#"{"headline":"<\/script><script>"}"#
        );
    }
}
