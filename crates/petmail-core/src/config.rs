//! Extraction options and their persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::strategy::StrategyId;

pub const DEFAULT_MAX_SUBJECT_LENGTH: usize = 200;
pub const DEFAULT_SUBJECT: &str = "Message from your grooming salon";
pub const DEFAULT_BODY_PLACEHOLDER: &str =
    "We could not generate the content of this message. Please review it before sending.";

pub const ENV_DEFAULT_SUBJECT: &str = "PETMAIL_DEFAULT_SUBJECT";
pub const ENV_MAX_SUBJECT_LENGTH: &str = "PETMAIL_MAX_SUBJECT_LENGTH";
pub const ENV_STRIP_MARKUP: &str = "PETMAIL_STRIP_MARKUP";
pub const ENV_FORMAT_HINT: &str = "PETMAIL_FORMAT_HINT";

/// Options for a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Subject used when none can be recovered from the text.
    #[serde(default = "default_subject")]
    pub default_subject: String,
    /// Upper bound on the subject, in characters.
    #[serde(default = "default_max_subject_length")]
    pub max_subject_length: usize,
    /// Strip all markup from the body instead of keeping the safe subset.
    #[serde(default)]
    pub strip_markup: bool,
    /// Strategy to try first.
    #[serde(default)]
    pub format_hint: Option<StrategyId>,
    /// Body used when the extracted body is empty after sanitization.
    #[serde(default = "default_body_placeholder")]
    pub body_placeholder: String,
    /// Cascade order before the hint is applied.
    #[serde(default = "default_strategy_order")]
    pub strategy_order: Vec<StrategyId>,
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.into()
}
fn default_max_subject_length() -> usize {
    DEFAULT_MAX_SUBJECT_LENGTH
}
fn default_body_placeholder() -> String {
    DEFAULT_BODY_PLACEHOLDER.into()
}
fn default_strategy_order() -> Vec<StrategyId> {
    StrategyId::cascade().to_vec()
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_subject: default_subject(),
            max_subject_length: DEFAULT_MAX_SUBJECT_LENGTH,
            strip_markup: false,
            format_hint: None,
            body_placeholder: default_body_placeholder(),
            strategy_order: default_strategy_order(),
        }
    }
}

impl ExtractOptions {
    pub fn new(default_subject: impl Into<String>) -> Self {
        Self {
            default_subject: default_subject.into(),
            ..Self::default()
        }
    }

    pub fn with_max_subject_length(mut self, max: usize) -> Self {
        self.max_subject_length = max;
        self
    }

    pub fn with_strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    pub fn with_format_hint(mut self, hint: StrategyId) -> Self {
        self.format_hint = Some(hint);
        self
    }

    pub fn with_body_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.body_placeholder = placeholder.into();
        self
    }

    pub fn with_strategy_order(mut self, order: Vec<StrategyId>) -> Self {
        self.strategy_order = order;
        self
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file, falling back to defaults, then apply
    /// `PETMAIL_*` environment overrides.
    pub fn load(path: &Path) -> Self {
        let mut options = match std::fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring malformed options file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                debug!("No options file at {}, using defaults", path.display());
                Self::default()
            }
        };
        options.apply_env(|key| std::env::var(key).ok());
        options
    }

    /// Apply overrides from an environment-like lookup. Unparseable values are
    /// skipped.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(subject) = lookup(ENV_DEFAULT_SUBJECT) {
            self.default_subject = subject;
        }
        if let Some(max) = lookup(ENV_MAX_SUBJECT_LENGTH).and_then(|v| v.trim().parse().ok()) {
            self.max_subject_length = max;
        }
        if let Some(strip) = lookup(ENV_STRIP_MARKUP) {
            match strip.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.strip_markup = true,
                "0" | "false" | "no" | "off" => self.strip_markup = false,
                other => warn!("Ignoring {}={}", ENV_STRIP_MARKUP, other),
            }
        }
        if let Some(hint) = lookup(ENV_FORMAT_HINT) {
            match hint.parse() {
                Ok(id) => self.format_hint = Some(id),
                Err(e) => warn!("Ignoring {}: {}", ENV_FORMAT_HINT, e),
            }
        }
    }

    /// Save options to disk as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check for caller errors that make extraction impossible.
    pub fn validate(&self) -> Result<()> {
        if self.default_subject.trim().is_empty() {
            return Err(Error::MissingDefaultSubject);
        }
        if self.max_subject_length == 0 {
            return Err(Error::Config("maxSubjectLength must be at least 1".into()));
        }
        if self.strategy_order.is_empty() {
            return Err(Error::Config("strategyOrder must not be empty".into()));
        }
        if self.strategy_order.contains(&StrategyId::Fallback) {
            return Err(Error::Config(
                "fallback runs after the cascade and cannot be ordered".into(),
            ));
        }
        Ok(())
    }
}
