//! Candidate validation and normalization.
//!
//! Rules, in order:
//! 1. A candidate with neither field is rejected.
//! 2. The subject is reduced to plain single-line text and bounded to
//!    `max_subject_length` characters.
//! 3. The body keeps only the safe markup subset, or no markup at all when
//!    `strip_markup` is set. This is the boundary that keeps executable
//!    content out of outbound mail.
//! 4. An empty subject becomes the default subject.
//! 5. A body with no visible text becomes the configured placeholder.
//!
//! Past rule 1 nothing is rejected, and the output is a fixpoint: validating a
//! record's fields again yields the same record.

use petmail_core::config::{DEFAULT_BODY_PLACEHOLDER, DEFAULT_SUBJECT};
use petmail_core::ExtractOptions;

use crate::sanitize;
use crate::types::{Candidate, StructuredRecord};

/// What normalization had to change to produce a valid record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Adjustments {
    pub subject_truncated: bool,
    pub subject_defaulted: bool,
    pub body_placeholder: bool,
}

/// Validate a candidate, or reject it when it carries no content at all.
pub fn validate(candidate: &Candidate, options: &ExtractOptions) -> Option<StructuredRecord> {
    validate_with_adjustments(candidate, options).map(|(record, _)| record)
}

pub(crate) fn validate_with_adjustments(
    candidate: &Candidate,
    options: &ExtractOptions,
) -> Option<(StructuredRecord, Adjustments)> {
    if candidate.is_empty() {
        return None;
    }
    Some(normalize(candidate, options))
}

/// Apply rules 2-5. Never fails.
pub(crate) fn normalize(
    candidate: &Candidate,
    options: &ExtractOptions,
) -> (StructuredRecord, Adjustments) {
    let mut adjustments = Adjustments::default();
    let max = options.max_subject_length.max(1);

    let (mut subject, truncated) = sanitize_subject(candidate.subject.as_deref().unwrap_or(""), max);
    adjustments.subject_truncated = truncated;
    if subject.is_empty() {
        adjustments.subject_defaulted = true;
        let (default, truncated) = sanitize_subject(&options.default_subject, max);
        adjustments.subject_truncated = truncated;
        subject = if default.is_empty() {
            sanitize_subject(DEFAULT_SUBJECT, max).0
        } else {
            default
        };
    }

    let mut body = sanitize_body(candidate.body.as_deref().unwrap_or(""), options.strip_markup);
    if !has_text(&body) {
        adjustments.body_placeholder = true;
        body = sanitize_body(&options.body_placeholder, options.strip_markup);
        if !has_text(&body) {
            body = DEFAULT_BODY_PLACEHOLDER.to_string();
        }
    }

    let record = StructuredRecord {
        subject,
        body,
        strategy: candidate.strategy,
    };
    (record, adjustments)
}

/// Whether a sanitized body shows anything once its tags are removed.
fn has_text(body: &str) -> bool {
    !sanitize::strip_markup(body).trim().is_empty()
}

/// Plain, single-line, bounded subject text.
pub fn sanitize_subject(raw: &str, max_chars: usize) -> (String, bool) {
    let plain = sanitize::collapse_whitespace(&sanitize::strip_markup(raw));
    sanitize::truncate_chars(&plain, max_chars)
}

/// Body text with normalized line endings and either the safe markup subset
/// or no markup at all.
pub fn sanitize_body(raw: &str, strip_markup: bool) -> String {
    let text = sanitize::normalize_newlines(raw.trim());
    let text = if strip_markup {
        sanitize::strip_markup(&text)
    } else {
        sanitize::safe_markup(&text)
    };
    sanitize::squeeze_blank_lines(&text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmail_core::StrategyId;

    fn options() -> ExtractOptions {
        ExtractOptions::new("Mensagem do Pet Shop")
    }

    fn candidate(subject: Option<&str>, body: Option<&str>) -> Candidate {
        Candidate::new(
            StrategyId::LabeledSection,
            subject.map(String::from),
            body.map(String::from),
        )
    }

    #[test]
    fn test_rejects_empty_candidate() {
        assert!(validate(&candidate(None, None), &options()).is_none());
        assert!(validate(&candidate(Some(" "), Some("\n\n")), &options()).is_none());
    }

    #[test]
    fn test_subject_plain_text() {
        let record = validate(
            &candidate(Some("<h1>Banho\n  e   tosa</h1>"), Some("ok")),
            &options(),
        )
        .unwrap();
        assert_eq!(record.subject, "Banho e tosa");
        assert_eq!(record.strategy, StrategyId::LabeledSection);
    }

    #[test]
    fn test_subject_truncated() {
        let opts = options().with_max_subject_length(10);
        let (record, adj) =
            validate_with_adjustments(&candidate(Some("A very long subject line"), Some("b")), &opts)
                .unwrap();
        assert_eq!(record.subject, "A very lo…");
        assert!(adj.subject_truncated);
        assert!(!adj.subject_defaulted);
    }

    #[test]
    fn test_default_subject_substituted() {
        let (record, adj) =
            validate_with_adjustments(&candidate(Some("<br>"), Some("corpo")), &options()).unwrap();
        assert_eq!(record.subject, "Mensagem do Pet Shop");
        assert!(adj.subject_defaulted);
    }

    #[test]
    fn test_default_subject_respects_bound() {
        let opts = options().with_max_subject_length(8);
        let record = validate(&candidate(None, Some("corpo")), &opts).unwrap();
        assert!(record.subject.chars().count() <= 8);
    }

    #[test]
    fn test_body_placeholder() {
        let opts = options().with_body_placeholder("Revise esta mensagem.");
        let (record, adj) =
            validate_with_adjustments(&candidate(Some("Oi"), Some("<script>x()</script>")), &opts)
                .unwrap();
        assert_eq!(record.body, "Revise esta mensagem.");
        assert!(adj.body_placeholder);
    }

    #[test]
    fn test_tag_only_body_gets_placeholder() {
        let (record, adj) =
            validate_with_adjustments(&candidate(Some("Oi"), Some("<p> </p><br>")), &options())
                .unwrap();
        assert_eq!(record.body, DEFAULT_BODY_PLACEHOLDER);
        assert!(adj.body_placeholder);
    }

    #[test]
    fn test_blank_placeholder_uses_builtin() {
        let opts = options().with_body_placeholder("   ");
        let record = validate(&candidate(Some("Oi"), None), &opts).unwrap();
        assert_eq!(record.body, DEFAULT_BODY_PLACEHOLDER);
    }

    #[test]
    fn test_body_safe_subset_kept() {
        let record = validate(
            &candidate(Some("Oi"), Some("<p onclick=\"x()\">Olá <em>Rex</em></p>\r\n<script>evil()</script>")),
            &options(),
        )
        .unwrap();
        assert_eq!(record.body, "<p>Olá <em>Rex</em></p>");
    }

    #[test]
    fn test_body_markup_stripped() {
        let opts = options().with_strip_markup(true);
        let record = validate(&candidate(Some("Oi"), Some("<p>Olá <em>Rex</em></p>")), &opts).unwrap();
        assert_eq!(record.body, "Olá Rex");
    }

    #[test]
    fn test_revalidation_is_identity() {
        let opts = options().with_max_subject_length(12);
        let first = validate(
            &candidate(
                Some("<b>Confirmação</b> do seu agendamento"),
                Some("Linha 1\r\n\r\n\r\n<a href='https://pet.example' onclick='x'>link</a>"),
            ),
            &opts,
        )
        .unwrap();
        let second = validate(&first.to_candidate(), &opts).unwrap();
        assert_eq!(first, second);
    }
}
