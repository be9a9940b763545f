//! Field-name vocabulary shared by the JSON lookup and the label patterns.
//!
//! Providers answer in Portuguese, English or Spanish regardless of what the
//! prompt asked for, so every list covers all three, with and without accents.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SUBJECT_ALIASES: &[&str] = &[
    "subject", "assunto", "título", "titulo", "title", "asunto", "tema",
];

pub const BODY_ALIASES: &[&str] = &[
    "body", "corpo", "mensagem", "message", "conteúdo", "conteudo", "content", "texto", "text",
    "cuerpo", "mensaje", "contenido",
];

/// Pattern for a label at the start of a line, tolerating Markdown decoration
/// such as `**Subject:**` or `## Assunto:`. Consumes trailing spaces.
pub fn label_pattern(aliases: &[&str]) -> String {
    let alternation = aliases
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"[ \t]*(?:[#>]+[ \t]*)?[*_]*[ \t]*(?:{alternation})[ \t]*[*_]*[ \t]*:[ \t]*[*_]*[ \t]*")
}

static ANY_LABEL_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let aliases: Vec<&str> = SUBJECT_ALIASES.iter().chain(BODY_ALIASES).copied().collect();
    Regex::new(&format!(r"(?i)\A\s*{}", label_pattern(&aliases))).unwrap()
});
static BODY_LABEL_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\A\s*{}", label_pattern(BODY_ALIASES))).unwrap());

/// Remove one leading subject or body label, if present.
pub fn strip_label_prefix(text: &str) -> &str {
    match ANY_LABEL_PREFIX_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Remove one leading body label, if present.
pub fn strip_body_label(text: &str) -> &str {
    match BODY_LABEL_PREFIX_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Case-insensitive membership test for JSON keys.
pub fn matches_alias(key: &str, aliases: &[&str]) -> bool {
    let key = key.trim().to_lowercase();
    aliases.iter().any(|a| *a == key)
}
