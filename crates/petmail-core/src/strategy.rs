//! Extraction strategy identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifies one way of turning provider text into a subject/body pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyId {
    /// A JSON document, whole or embedded in prose.
    StructuredEncoding,
    /// `Subject:` / `Body:` style labels.
    LabeledSection,
    /// First paragraph is the subject, the rest is the body.
    BlankLineSeparated,
    /// Everything is the body.
    PlainText,
    /// Last resort after every strategy was exhausted. Never part of a cascade.
    Fallback,
}

impl StrategyId {
    /// Default cascade order.
    pub fn cascade() -> &'static [StrategyId] {
        &[
            Self::StructuredEncoding,
            Self::LabeledSection,
            Self::BlankLineSeparated,
            Self::PlainText,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredEncoding => "structured-encoding",
            Self::LabeledSection => "labeled-section",
            Self::BlankLineSeparated => "blank-line-separated",
            Self::PlainText => "plain-text",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for StrategyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "structured-encoding" | "structured" | "json" => Ok(Self::StructuredEncoding),
            "labeled-section" | "labeled" | "labels" | "labelled" => Ok(Self::LabeledSection),
            "blank-line-separated" | "blank-line" | "paragraphs" => Ok(Self::BlankLineSeparated),
            "plain-text" | "plain" | "text" => Ok(Self::PlainText),
            "fallback" => Ok(Self::Fallback),
            _ => Err(Error::Config(format!("unknown strategy: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for id in StrategyId::cascade() {
            assert_eq!(id.to_string().parse::<StrategyId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_short_hint_names() {
        assert_eq!("JSON".parse::<StrategyId>().unwrap(), StrategyId::StructuredEncoding);
        assert_eq!("paragraphs".parse::<StrategyId>().unwrap(), StrategyId::BlankLineSeparated);
        assert_eq!("labeled_section".parse::<StrategyId>().unwrap(), StrategyId::LabeledSection);
        assert!("yaml".parse::<StrategyId>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&StrategyId::BlankLineSeparated).unwrap();
        assert_eq!(json, "\"blank-line-separated\"");
        let id: StrategyId = serde_json::from_str("\"plain-text\"").unwrap();
        assert_eq!(id, StrategyId::PlainText);
    }

    #[test]
    fn test_cascade_excludes_fallback() {
        assert_eq!(StrategyId::cascade().len(), 4);
        assert!(!StrategyId::cascade().contains(&StrategyId::Fallback));
    }
}
