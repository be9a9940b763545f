//! Whole text as the body; the validator supplies the default subject.

use petmail_core::StrategyId;

use super::Strategy;
use crate::types::Candidate;

pub struct PlainText;

impl Strategy for PlainText {
    fn id(&self) -> StrategyId {
        StrategyId::PlainText
    }

    fn attempt(&self, text: &str) -> Option<Candidate> {
        let candidate = Candidate::new(StrategyId::PlainText, None, Some(text.to_string()));
        (!candidate.is_empty()).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_body() {
        let c = PlainText.attempt("mensagem única sem estrutura alguma").unwrap();
        assert_eq!(c.subject, None);
        assert_eq!(c.body.as_deref(), Some("mensagem única sem estrutura alguma"));
    }

    #[test]
    fn test_plain_text_blank() {
        assert!(PlainText.attempt("  ").is_none());
    }
}
