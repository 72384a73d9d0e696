//! Core traits for the content-type builder
//!
//! The editing store never validates user input itself; these checks exist
//! so tests and tooling can assert that a state snapshot still honours the
//! schema invariants after a sequence of edits.

use crate::error::BuilderResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use ctb_core::{BuilderError, BuilderResult, Validatable};
///
/// struct Category {
///     name: String,
/// }
///
/// impl Validatable for Category {
///     fn validate(&self) -> BuilderResult<()> {
///         if self.name.is_empty() {
///             return Err(BuilderError::validation("Name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `BuilderError` describing the first problem.
    fn validate(&self) -> BuilderResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderError;

    struct NonEmpty(&'static str);

    impl Validatable for NonEmpty {
        fn validate(&self) -> BuilderResult<()> {
            if self.0.is_empty() {
                return Err(BuilderError::validation("empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(NonEmpty("x").is_valid());
        assert!(NonEmpty("x").validation_errors().is_empty());

        let invalid = NonEmpty("");
        assert!(!invalid.is_valid());
        assert_eq!(
            invalid.validation_errors(),
            vec!["Validation error: empty".to_string()]
        );
    }
}
