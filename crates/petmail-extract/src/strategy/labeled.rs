//! `Subject:` / `Body:` sections, in any of the supported languages.

use once_cell::sync::Lazy;
use petmail_core::StrategyId;
use regex::Regex;

use super::Strategy;
use crate::labels::{
    label_pattern, strip_body_label, strip_label_prefix, BODY_ALIASES, SUBJECT_ALIASES,
};
use crate::types::Candidate;

/// Subject label, its line, any lines in between, then a body label and
/// everything after it.
static SUBJECT_AND_BODY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?ims)^{subject}(?P<subject>[^\r\n]*?)[ \t]*\r?\n(?P<gap>.*?)^{body}(?P<body>.*)\z",
        subject = label_pattern(SUBJECT_ALIASES),
        body = label_pattern(BODY_ALIASES),
    ))
    .unwrap()
});

static SUBJECT_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?im)^{subject}(?P<subject>[^\r\n]*)",
        subject = label_pattern(SUBJECT_ALIASES),
    ))
    .unwrap()
});

/// A body label inside the subject line, as in `Subject: Oi Body: Tudo certo`.
static INLINE_BODY_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = BODY_ALIASES
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)[ \t]+[*_]*(?:{alternation})[ \t]*[*_]*[ \t]*:[ \t]*[*_]*[ \t]*"
    ))
    .unwrap()
});

pub struct LabeledSection;

impl Strategy for LabeledSection {
    fn id(&self) -> StrategyId {
        StrategyId::LabeledSection
    }

    fn attempt(&self, text: &str) -> Option<Candidate> {
        subject_and_body(text).or_else(|| subject_only(text))
    }
}

fn subject_and_body(text: &str) -> Option<Candidate> {
    let caps = SUBJECT_AND_BODY_RE.captures(text)?;
    let mut subject = caps["subject"].trim().to_string();
    if subject.is_empty() {
        // "Subject:" alone on its line, value below it.
        subject = first_non_blank_line(&caps["gap"]).unwrap_or_default().to_string();
    }
    let candidate = Candidate::new(
        StrategyId::LabeledSection,
        Some(subject),
        Some(caps["body"].to_string()),
    );
    (!candidate.is_empty()).then_some(candidate)
}

fn subject_only(text: &str) -> Option<Candidate> {
    let caps = SUBJECT_LINE_RE.captures(text)?;
    let line_end = caps.get(0)?.end();
    let mut subject = caps["subject"].trim().to_string();
    let mut rest = text[line_end..].trim();

    if subject.is_empty() {
        if let Some(line) = first_non_blank_line(rest) {
            subject = line.to_string();
            rest = rest[rest.find(line).unwrap_or(0) + line.len()..].trim();
        }
    }

    let mut body = strip_body_label(rest).to_string();
    if let Some((head, inline)) = split_inline_body(&subject) {
        body = if body.is_empty() {
            inline.to_string()
        } else {
            format!("{inline}\n{body}")
        };
        subject = head.to_string();
    }

    let candidate = Candidate::new(StrategyId::LabeledSection, Some(subject), Some(body));
    (!candidate.is_empty()).then_some(candidate)
}

/// Split `Oi Body: Tudo certo` into its subject and body parts. Both must be
/// non-empty.
fn split_inline_body(subject: &str) -> Option<(&str, &str)> {
    let m = INLINE_BODY_LABEL_RE.find(subject)?;
    let head = subject[..m.start()].trim();
    let inline = subject[m.end()..].trim();
    (!head.is_empty() && !inline.is_empty()).then_some((head, inline))
}

/// First non-blank line that is not itself a label.
fn first_non_blank_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && strip_label_prefix(l).len() == l.len())
}
