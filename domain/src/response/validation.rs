//! Validation verdicts and the structured data they carry.

use crate::story::{Cast, DialogueOptions};

/// Structured data pulled out of a conforming response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Extracted {
    /// Presence-only contracts carry nothing
    #[default]
    Nothing,
    Cast(Cast),
    Options(DialogueOptions),
}

impl Extracted {
    pub fn into_cast(self) -> Option<Cast> {
        match self {
            Extracted::Cast(cast) => Some(cast),
            _ => None,
        }
    }

    pub fn into_options(self) -> Option<DialogueOptions> {
        match self {
            Extracted::Options(options) => Some(options),
            _ => None,
        }
    }
}

/// Verdict of a structural validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid(Extracted),
    Invalid { reason: String },
}

impl ValidationResult {
    pub fn valid() -> Self {
        ValidationResult::Valid(Extracted::Nothing)
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ValidationResult::Invalid {
            reason: reason.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// The rejection reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid(_) => None,
            ValidationResult::Invalid { reason } => Some(reason),
        }
    }

    pub fn into_result(self) -> Result<Extracted, String> {
        match self {
            ValidationResult::Valid(extracted) => Ok(extracted),
            ValidationResult::Invalid { reason } => Err(reason),
        }
    }
}
