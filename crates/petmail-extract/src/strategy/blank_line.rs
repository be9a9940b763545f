//! First paragraph as the subject, everything after the first blank line as
//! the body.

use once_cell::sync::Lazy;
use petmail_core::StrategyId;
use regex::Regex;

use super::Strategy;
use crate::labels::strip_label_prefix;
use crate::sanitize::strip_markup;
use crate::types::Candidate;

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());

pub struct BlankLineSeparated;

impl Strategy for BlankLineSeparated {
    fn id(&self) -> StrategyId {
        StrategyId::BlankLineSeparated
    }

    fn attempt(&self, text: &str) -> Option<Candidate> {
        let mut parts = BLANK_LINES_RE.splitn(text, 2);
        let head = parts.next()?.trim();
        let tail = parts.next()?.trim();
        if head.is_empty() || tail.is_empty() {
            return None;
        }

        let subject = strip_markup(head);
        let subject = strip_label_prefix(subject.trim()).trim().to_string();
        let body = strip_label_prefix(tail).trim().to_string();

        let candidate = Candidate::new(StrategyId::BlankLineSeparated, Some(subject), Some(body));
        (!candidate.is_empty()).then_some(candidate)
    }
}
