//! Common error infrastructure for mud-core.
//!
//! This module provides the shared classification used by every error type in
//! the crate. Domain-specific errors (e.g., `WearError`, `CharacterError`) are
//! defined next to the operations that produce them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failing operation has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Stable Codes**: Every variant maps to a static code for logs and tests
//!
//! Invariant violations on a character are never reported as errors; the
//! validation pipeline clamps them instead.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The request may succeed after the player changes something
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Catalog or state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the blocking condition is gone.
    ///
    /// Examples: cursed weapon in hand, no stat points left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: item cannot be worn, slot unusable by race
    Validation,

    /// Internal error - unexpected inconsistency.
    ///
    /// Examples: a worn item references a buff id the catalog does not know
    Internal,

    /// Fatal error - catalog data corrupted, cannot continue.
    ///
    /// Examples: duplicate definitions while building a catalog
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all mud-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
