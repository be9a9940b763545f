//! JSON responses, either the whole text or a flat object embedded in prose.

use once_cell::sync::Lazy;
use petmail_core::StrategyId;
use regex::Regex;
use serde_json::{Map, Value};

use super::Strategy;
use crate::labels::{matches_alias, BODY_ALIASES, SUBJECT_ALIASES};
use crate::types::Candidate;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A```[A-Za-z0-9_-]*[ \t]*\r?\n(.*?)\r?\n?[ \t]*```\s*\z").unwrap()
});

// Brace-free objects only: a nested or split object is left to later strategies.
static EMBEDDED_OBJECT_RE: Lazy<Regex> = Lazy::new(|| {
    let keys = SUBJECT_ALIASES
        .iter()
        .chain(BODY_ALIASES)
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r#"(?i)\{{[^{{}}]*?"\s*(?:{keys})\s*"\s*:[^{{}}]*\}}"#)).unwrap()
});

pub struct StructuredEncoding;

impl Strategy for StructuredEncoding {
    fn id(&self) -> StrategyId {
        StrategyId::StructuredEncoding
    }

    fn attempt(&self, text: &str) -> Option<Candidate> {
        let document = FENCE_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map_or(text, |m| m.as_str().trim());

        if let Ok(value) = serde_json::from_str::<Value>(document) {
            if let Some(candidate) = from_value(&value) {
                return Some(candidate);
            }
        }

        EMBEDDED_OBJECT_RE.find_iter(text).find_map(|m| {
            serde_json::from_str::<Value>(m.as_str())
                .ok()
                .and_then(|v| from_value(&v))
        })
    }
}

fn from_value(value: &Value) -> Option<Candidate> {
    let object = match value {
        Value::Object(map) => map,
        Value::Array(items) => items.iter().find_map(Value::as_object)?,
        _ => return None,
    };
    let candidate = Candidate::new(
        StrategyId::StructuredEncoding,
        lookup(object, SUBJECT_ALIASES),
        lookup(object, BODY_ALIASES),
    );
    (!candidate.is_empty()).then_some(candidate)
}

/// First non-blank value whose key matches an alias, in alias order.
fn lookup(object: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        object
            .iter()
            .filter(|(key, _)| matches_alias(key, &[*alias]))
            .find_map(|(_, value)| field_text(value))
    })
}

fn field_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(lines) => lines
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_document() {
        let c = StructuredEncoding
            .attempt(r#"{"subject": "Bath Reminder", "body": "See you tomorrow!"}"#)
            .unwrap();
        assert_eq!(c.subject.as_deref(), Some("Bath Reminder"));
        assert_eq!(c.body.as_deref(), Some("See you tomorrow!"));
    }

    #[test]
    fn test_case_insensitive_aliases() {
        let c = StructuredEncoding
            .attempt(r#"{"ASSUNTO": "Lembrete", "Mensagem": "Seu pet está pronto."}"#)
            .unwrap();
        assert_eq!(c.subject.as_deref(), Some("Lembrete"));
        assert_eq!(c.body.as_deref(), Some("Seu pet está pronto."));
    }

    #[test]
    fn test_fenced_document() {
        let text = "```json\n{\n  \"title\": \"Vacina\",\n  \"content\": \"Lembrete da vacina.\"\n}\n```";
        let c = StructuredEncoding.attempt(text).unwrap();
        assert_eq!(c.subject.as_deref(), Some("Vacina"));
        assert_eq!(c.body.as_deref(), Some("Lembrete da vacina."));
    }

    #[test]
    fn test_embedded_in_prose() {
        let text = r#"Claro! Aqui está: {"subject": "Tosa", "body": "Agendada para sexta."} Espero que ajude."#;
        let c = StructuredEncoding.attempt(text).unwrap();
        assert_eq!(c.subject.as_deref(), Some("Tosa"));
        assert_eq!(c.body.as_deref(), Some("Agendada para sexta."));
    }

    #[test]
    fn test_one_field_is_enough() {
        let c = StructuredEncoding.attempt(r#"{"body": "Only a body"}"#).unwrap();
        assert_eq!(c.subject, None);
        assert_eq!(c.body.as_deref(), Some("Only a body"));
    }

    #[test]
    fn test_array_body_joined() {
        let c = StructuredEncoding
            .attempt(r#"{"subject": "Oi", "body": ["Linha 1", "Linha 2"]}"#)
            .unwrap();
        assert_eq!(c.body.as_deref(), Some("Linha 1\nLinha 2"));
    }

    #[test]
    fn test_unknown_keys_no_match() {
        assert!(StructuredEncoding.attempt(r#"{"greeting": "hi"}"#).is_none());
        assert!(StructuredEncoding.attempt(r#"{"subject": "", "body": "  "}"#).is_none());
        assert!(StructuredEncoding.attempt("no json here").is_none());
    }

    #[test]
    fn test_nested_embedded_object_not_found() {
        let text = r#"Here: {"email": {"subject": "A", "meta": {"x": 1}}} done"#;
        assert!(StructuredEncoding.attempt(text).is_none());
    }
}
