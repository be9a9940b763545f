//! Last resort once every strategy in the cascade has been exhausted.

use petmail_core::{ExtractOptions, StrategyId};

use crate::labels::strip_label_prefix;
use crate::types::{Candidate, StructuredRecord};
use crate::validate::{normalize, Adjustments};

/// Longest first line still considered a plausible subject.
pub const MAX_SUBJECT_LINE_CHARS: usize = 150;

/// Build a record from trimmed, non-empty text. Always succeeds.
///
/// A short first line that does not read like a finished sentence becomes
/// the subject and the remaining lines the body. Otherwise the default
/// subject is used and the whole text becomes the body.
pub fn ultimate_fallback(text: &str, options: &ExtractOptions) -> StructuredRecord {
    fallback_with_adjustments(text, options).0
}

pub(crate) fn fallback_with_adjustments(
    text: &str,
    options: &ExtractOptions,
) -> (StructuredRecord, Adjustments) {
    let candidate = match split_subject_line(text) {
        Some((subject, body)) => Candidate::new(
            StrategyId::Fallback,
            Some(subject.to_string()),
            Some(body),
        ),
        None => Candidate::new(StrategyId::Fallback, None, Some(text.to_string())),
    };
    normalize(&candidate, options)
}

/// A lone plausible line still becomes the subject; the validator then
/// supplies the placeholder body.
fn split_subject_line(text: &str) -> Option<(&str, String)> {
    let mut lines = text.lines();
    let first = strip_label_prefix(lines.next()?.trim()).trim();
    let rest = lines.collect::<Vec<_>>().join("\n");
    let rest = rest.trim();

    let plausible = !first.is_empty()
        && first.chars().count() <= MAX_SUBJECT_LINE_CHARS
        && !first.ends_with(['.', '!', '?']);
    plausible.then(|| (first, rest.to_string()))
}
