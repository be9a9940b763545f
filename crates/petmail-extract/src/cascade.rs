//! Strategy cascade: try each strategy in order, keep the first candidate the
//! validator accepts, fall back when none is.

use petmail_core::{Error, ExtractOptions, Result};
use tracing::{debug, info, warn};

use crate::diagnostics::{fingerprint, Attempt, Diagnostics, Outcome};
use crate::fallback::fallback_with_adjustments;
use crate::strategy;
use crate::types::StructuredRecord;
use crate::validate::validate_with_adjustments;

/// Turns provider text into a validated subject/body record.
#[derive(Debug, Clone)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    /// Create an extractor, rejecting options that make extraction impossible.
    pub fn new(options: ExtractOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract a record. `None` only when the text is blank.
    pub fn extract(&self, text: &str) -> Option<StructuredRecord> {
        self.run(text).ok().map(|(record, _)| record)
    }

    /// Like [`Extractor::extract`], reporting why there is no result.
    pub fn try_extract(&self, text: &str) -> Result<StructuredRecord> {
        self.run(text).map(|(record, _)| record)
    }

    /// Extract a record together with a description of how it was obtained.
    pub fn extract_with_diagnostics(&self, text: &str) -> Result<(StructuredRecord, Diagnostics)> {
        self.run(text)
    }

    fn run(&self, text: &str) -> Result<(StructuredRecord, Diagnostics)> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }

        let order = strategy::ordered(&self.options.strategy_order, self.options.format_hint);
        let mut attempts = Vec::with_capacity(order.len());

        for id in order {
            let Some(heuristic) = strategy::for_id(id) else {
                continue;
            };
            let Some(candidate) = heuristic.attempt(text) else {
                debug!("Strategy {} found no match", id);
                attempts.push(Attempt { strategy: id, outcome: Outcome::NoMatch });
                continue;
            };
            match validate_with_adjustments(&candidate, &self.options) {
                Some((record, adjustments)) => {
                    attempts.push(Attempt { strategy: id, outcome: Outcome::Accepted });
                    let diagnostics = Diagnostics::new(text, &record, attempts, adjustments);
                    info!("Extracted [{}] {}", diagnostics.fingerprint, diagnostics.summary());
                    return Ok((record, diagnostics));
                }
                None => {
                    debug!("Strategy {} candidate rejected", id);
                    attempts.push(Attempt { strategy: id, outcome: Outcome::Rejected });
                }
            }
        }

        warn!(
            "All {} strategies exhausted for [{}], using fallback",
            attempts.len(),
            fingerprint(text)
        );
        let (record, adjustments) = fallback_with_adjustments(text, &self.options);
        let diagnostics = Diagnostics::new(text, &record, attempts, adjustments);
        Ok((record, diagnostics))
    }
}

/// Extract with the given options. `None` when the text is blank or the
/// options lack a usable default subject.
pub fn extract(text: &str, options: &ExtractOptions) -> Option<StructuredRecord> {
    try_extract(text, options).ok()
}

/// Extract with the given options, reporting caller errors.
pub fn try_extract(text: &str, options: &ExtractOptions) -> Result<StructuredRecord> {
    Extractor::new(options.clone())?.try_extract(text)
}
