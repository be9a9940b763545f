//! Petmail Extract: turns generated email text into a validated subject and body.
//!
//! Provider output arrives as JSON, labeled sections, blank-line separated
//! paragraphs or plain prose. Strategies for each shape are tried in order and
//! the first candidate that survives validation wins; a fallback guarantees a
//! record for any non-blank input.

pub mod cascade;
pub mod diagnostics;
pub mod fallback;
pub mod labels;
pub mod sanitize;
pub mod strategy;
pub mod types;
pub mod validate;

pub use cascade::{extract, try_extract, Extractor};
pub use diagnostics::{Attempt, Diagnostics, Outcome};
pub use fallback::ultimate_fallback;
pub use types::{Candidate, StructuredRecord};
pub use validate::validate;

pub use petmail_core::{Error, ExtractOptions, Result, StrategyId};
