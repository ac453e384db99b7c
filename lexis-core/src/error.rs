use thiserror::Error;

use crate::resolve::ResolutionState;

/// Why a resolution fell back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("'key' is not defined")]
    MissingKey,
    #[error("neither 'locale' nor 'default_locale' is defined")]
    MissingLocale,
    #[error("'content' is not defined")]
    MissingContent,
    #[error("'content' has no entry for 'locale' or 'default_locale'")]
    LocaleNotFound,
    #[error("'content' does not contain 'key'")]
    KeyNotFound,
    #[error("'key' mixes {{{{name}}}} and %s-style placeholders")]
    InconsistentReplacementStyle,
    #[error("'key' is plural and 'plural' is not defined")]
    MissingPluralSelector,
    #[error("plural category not found in 'key'")]
    PluralCategoryNotFound,
    #[error("'key' has placeholders and 'replacements' is missing or of the wrong shape")]
    MissingOrInvalidReplacements,
}

impl ResolveError {
    /// Whether `silent` suppresses the diagnostic for this failure.
    pub fn is_silenceable(self) -> bool {
        !matches!(
            self,
            ResolveError::LocaleNotFound
                | ResolveError::KeyNotFound
                | ResolveError::InconsistentReplacementStyle
        )
    }
}

/// A failed resolution together with the state it stopped in.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct Failure<'a> {
    pub error: ResolveError,
    pub state: ResolutionState<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ResolveError::MissingKey.to_string(), "'key' is not defined");
        assert_eq!(
            ResolveError::InconsistentReplacementStyle.to_string(),
            "'key' mixes {{name}} and %s-style placeholders"
        );
    }

    #[test]
    fn test_silenceable() {
        assert!(ResolveError::MissingKey.is_silenceable());
        assert!(ResolveError::PluralCategoryNotFound.is_silenceable());
        assert!(ResolveError::MissingOrInvalidReplacements.is_silenceable());
        assert!(!ResolveError::LocaleNotFound.is_silenceable());
        assert!(!ResolveError::KeyNotFound.is_silenceable());
        assert!(!ResolveError::InconsistentReplacementStyle.is_silenceable());
    }
}
