//! Extraction types.

use petmail_core::StrategyId;
use serde::Serialize;

/// Unvalidated subject/body pair produced by one strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub strategy: StrategyId,
}

impl Candidate {
    /// Build a candidate, turning blank fields into `None`.
    pub fn new(strategy: StrategyId, subject: Option<String>, body: Option<String>) -> Self {
        Self {
            subject: non_blank(subject),
            body: non_blank(body),
            strategy,
        }
    }

    /// True when neither field carries any text.
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.body.is_none()
    }
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Validated, sanitized message content. Both fields are always non-empty and
/// the subject respects the configured length bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredRecord {
    pub subject: String,
    pub body: String,
    pub strategy: StrategyId,
}

impl StructuredRecord {
    /// Re-wrap the record as a candidate, e.g. to validate it again.
    pub fn to_candidate(&self) -> Candidate {
        Candidate::new(self.strategy, Some(self.subject.clone()), Some(self.body.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_blank_fields_are_absent() {
        let c = Candidate::new(StrategyId::PlainText, Some("   ".into()), Some("\n".into()));
        assert!(c.is_empty());
    }

    #[test]
    fn test_candidate_trims() {
        let c = Candidate::new(StrategyId::LabeledSection, Some(" Oi ".into()), None);
        assert_eq!(c.subject.as_deref(), Some("Oi"));
        assert!(!c.is_empty());
    }

    #[test]
    fn test_record_serializes_strategy_kebab_case() {
        let record = StructuredRecord {
            subject: "Bath Reminder".into(),
            body: "See you tomorrow!".into(),
            strategy: StrategyId::StructuredEncoding,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["strategy"], "structured-encoding");
        assert_eq!(json["subject"], "Bath Reminder");
    }
}
