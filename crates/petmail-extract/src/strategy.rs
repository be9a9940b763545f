//! Extraction strategies, one heuristic each for pulling a subject and body
//! out of provider text.
//!
//! Strategies never fail: a strategy that does not recognize the shape of the
//! text returns `None` and the cascade moves on.

pub mod blank_line;
pub mod labeled;
pub mod plain;
pub mod structured;

use petmail_core::StrategyId;

use crate::types::Candidate;

pub use blank_line::BlankLineSeparated;
pub use labeled::LabeledSection;
pub use plain::PlainText;
pub use structured::StructuredEncoding;

/// A single extraction heuristic.
pub trait Strategy: Send + Sync {
    fn id(&self) -> StrategyId;

    /// Try to read a candidate from already-trimmed text.
    fn attempt(&self, text: &str) -> Option<Candidate>;
}

static STRUCTURED: StructuredEncoding = StructuredEncoding;
static LABELED: LabeledSection = LabeledSection;
static BLANK_LINE: BlankLineSeparated = BlankLineSeparated;
static PLAIN: PlainText = PlainText;

/// The strategy registered for `id`. `Fallback` has none; it only runs after
/// the cascade is exhausted.
pub fn for_id(id: StrategyId) -> Option<&'static dyn Strategy> {
    match id {
        StrategyId::StructuredEncoding => Some(&STRUCTURED),
        StrategyId::LabeledSection => Some(&LABELED),
        StrategyId::BlankLineSeparated => Some(&BLANK_LINE),
        StrategyId::PlainText => Some(&PLAIN),
        StrategyId::Fallback => None,
    }
}

/// Cascade order: `order` without duplicates, with `hint` moved to the front
/// when it is part of `order`.
pub fn ordered(order: &[StrategyId], hint: Option<StrategyId>) -> Vec<StrategyId> {
    let mut result: Vec<StrategyId> = Vec::with_capacity(order.len());
    if let Some(hint) = hint.filter(|h| order.contains(h)) {
        result.push(hint);
    }
    for id in order {
        if !result.contains(id) {
            result.push(*id);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_id_matches_identity() {
        for id in StrategyId::cascade() {
            assert_eq!(for_id(*id).unwrap().id(), *id);
        }
        assert!(for_id(StrategyId::Fallback).is_none());
    }

    #[test]
    fn test_ordered_default() {
        assert_eq!(ordered(StrategyId::cascade(), None), StrategyId::cascade());
    }

    #[test]
    fn test_ordered_hint_moves_to_front() {
        let order = ordered(StrategyId::cascade(), Some(StrategyId::BlankLineSeparated));
        assert_eq!(
            order,
            vec![
                StrategyId::BlankLineSeparated,
                StrategyId::StructuredEncoding,
                StrategyId::LabeledSection,
                StrategyId::PlainText,
            ]
        );
    }

    #[test]
    fn test_ordered_ignores_foreign_hint_and_dedups() {
        let order = ordered(
            &[StrategyId::LabeledSection, StrategyId::LabeledSection, StrategyId::PlainText],
            Some(StrategyId::Fallback),
        );
        assert_eq!(order, vec![StrategyId::LabeledSection, StrategyId::PlainText]);
    }
}
