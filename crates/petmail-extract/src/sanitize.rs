//! Text cleaning primitives shared by the extractors and the validator.
//!
//! Every transform here is a fixpoint once applied: running it again on its
//! own output changes nothing. Markup passes are repeated until the text stops
//! changing, because removing one tag can splice its neighbours into a new one
//! (`<scr<b>ipt>`). Once settled, any `<` that does not open a tag the
//! sanitizer emitted itself is escaped, so an unclosed fragment cannot join
//! the surrounding template's markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

/// Appended to subjects cut at the length bound.
pub const ELLIPSIS: char = '…';

/// Elements removed together with their content.
const DANGEROUS_ELEMENTS: &[&str] = &["script", "style", "iframe", "object", "embed", "template"];

/// Elements kept (attribute-free, except `href` on `a`) in bodies.
const SAFE_ELEMENTS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "a", "ul", "ol", "li", "blockquote", "h1", "h2",
    "h3", "h4",
];

const SAFE_URL_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

const MAX_MARKUP_PASSES: usize = 8;

static DANGEROUS_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    let mut alternatives: Vec<String> = DANGEROUS_ELEMENTS
        .iter()
        .map(|t| format!(r"<{t}\b[^>]*>.*?</{t}\s*>"))
        .collect();
    alternatives.push(r"<!--.*?-->".to_string());
    Regex::new(&format!("(?is){}", alternatives.join("|"))).unwrap()
});
static ANY_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?[A-Za-z][^<>]*>|<![^<>]*>").unwrap());
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>").unwrap());
static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).unwrap()
});
static EMITTED_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"</?(?:{})>|<a href="[^"'<>\s]*">"#,
        SAFE_ELEMENTS.join("|")
    ))
    .unwrap()
});
static TAG_OPENER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([A-Za-z/!?])").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*){2,}").unwrap());

/// Remove all markup, dropping dangerous elements with their content.
/// Leftover `<` that could still open a tag is escaped; a lone `<` followed
/// by a space or digit is kept.
pub fn strip_markup(text: &str) -> String {
    let plain = until_stable(text, |s| {
        let without_blocks = DANGEROUS_BLOCK_RE.replace_all(s, "");
        ANY_TAG_RE.replace_all(&without_blocks, "").into_owned()
    });
    TAG_OPENER_RE.replace_all(&plain, "&lt;$1").into_owned()
}

/// Keep only the safe element subset, attribute-free except for a vetted
/// `href` on links. Angle brackets outside those tags are escaped.
pub fn safe_markup(text: &str) -> String {
    let rewritten = until_stable(text, |s| {
        let without_blocks = DANGEROUS_BLOCK_RE.replace_all(s, "");
        TAG_RE
            .replace_all(&without_blocks, |caps: &Captures| rewrite_tag(caps))
            .into_owned()
    });
    escape_stray_brackets(&rewritten)
}

/// Escape every `<` and `>` that is not part of an emitted tag.
fn escape_stray_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in EMITTED_TAG_RE.find_iter(text) {
        out.push_str(&escape_brackets(&text[last..m.start()]));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&escape_brackets(&text[last..]));
    out
}

fn escape_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn rewrite_tag(caps: &Captures) -> String {
    let name = caps[2].to_lowercase();
    if !SAFE_ELEMENTS.contains(&name.as_str()) {
        return String::new();
    }
    if !caps[1].is_empty() {
        return format!("</{name}>");
    }
    if name == "a" {
        if let Some(href) = safe_href(&caps[3]) {
            return format!("<a href=\"{href}\">");
        }
    }
    format!("<{name}>")
}

fn safe_href(attrs: &str) -> Option<&str> {
    let caps = HREF_RE.captures(attrs)?;
    let url = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?.as_str().trim();
    let lower = url.to_lowercase();
    let allowed = SAFE_URL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        && !url.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'));
    allowed.then_some(url)
}

/// Apply `pass` until the text stops changing. Text that never settles has its
/// angle brackets escaped so no markup can survive.
fn until_stable<F>(text: &str, pass: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut current = text.to_string();
    for _ in 0..MAX_MARKUP_PASSES {
        let next = pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    warn!("Markup did not settle after {} passes, escaping", MAX_MARKUP_PASSES);
    escape_brackets(&current)
}

/// Collapse every whitespace run (including newlines) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert `\r\n` and lone `\r` to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Squeeze runs of two or more blank lines down to one blank line.
pub fn squeeze_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

/// Bound `text` to `max_chars` characters, ending with [`ELLIPSIS`] when cut.
/// Returns the bounded text and whether it was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    if max_chars > 0 {
        out.push(ELLIPSIS);
    }
    (out, true)
}
