//! Extraction diagnostics for logs and support tooling.

use petmail_core::StrategyId;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::StructuredRecord;
use crate::validate::Adjustments;

/// How one strategy fared during a cascade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    NoMatch,
    Rejected,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub strategy: StrategyId,
    pub outcome: Outcome,
}

/// Summary of one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub strategy: StrategyId,
    pub attempts: Vec<Attempt>,
    pub input_chars: usize,
    pub subject_chars: usize,
    pub body_chars: usize,
    pub subject_truncated: bool,
    pub subject_defaulted: bool,
    pub body_placeholder: bool,
    /// Leading 16 hex digits of the SHA-256 of the trimmed input.
    pub fingerprint: String,
}

impl Diagnostics {
    pub(crate) fn new(
        input: &str,
        record: &StructuredRecord,
        attempts: Vec<Attempt>,
        adjustments: Adjustments,
    ) -> Self {
        Self {
            strategy: record.strategy,
            attempts,
            input_chars: input.chars().count(),
            subject_chars: record.subject.chars().count(),
            body_chars: record.body.chars().count(),
            subject_truncated: adjustments.subject_truncated,
            subject_defaulted: adjustments.subject_defaulted,
            body_placeholder: adjustments.body_placeholder,
            fingerprint: fingerprint(input),
        }
    }

    /// One-line human summary, e.g.
    /// `labeled-section after 2 attempts: input=120 subject=11 body=64 [defaulted subject]`.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} after {} attempt{}: input={} subject={} body={}",
            self.strategy,
            self.attempts.len(),
            if self.attempts.len() == 1 { "" } else { "s" },
            self.input_chars,
            self.subject_chars,
            self.body_chars,
        );

        let mut flags = Vec::new();
        if self.subject_truncated {
            flags.push("truncated subject");
        }
        if self.subject_defaulted {
            flags.push("defaulted subject");
        }
        if self.body_placeholder {
            flags.push("placeholder body");
        }
        if !flags.is_empty() {
            line.push_str(&format!(" [{}]", flags.join(", ")));
        }
        line
    }
}

/// Short content fingerprint, safe to log in place of the message itself.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(16);
    digest
}
