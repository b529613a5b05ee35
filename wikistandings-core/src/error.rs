//! Error taxonomy shared by the domain model and the consolidation engine.

use thiserror::Error;

/// Coarse classification of a failure, independent of the concrete type.
///
/// Callers that only care whether input was rejected at construction or
/// whether a stored row could not be interpreted can match on this instead of
/// the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A domain value failed its invariant at construction.
    InvalidArgument,
    /// A raw row from the record source could not be interpreted.
    MalformedRecord,
}

/// Errors returned when constructing domain values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An identifier was zero or negative.
    #[error("{field} must be greater than 0, got {value}")]
    NonPositiveId {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        value: i64,
    },
    /// A required text field was empty or whitespace.
    #[error("{field} must be neither empty nor blank")]
    BlankText {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A required value was absent.
    #[error("{field} is required")]
    Missing {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric field was negative, NaN or infinite.
    #[error("{field} must be a finite, non-negative number")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A count did not fit the supported range.
    #[error("{field} must be between 0 and {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        value: i64,
        /// Largest accepted value.
        max: i64,
    },
}

impl ValidationError {
    /// Every validation failure is an invalid argument.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }

    /// Name of the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId { field, .. }
            | Self::BlankText { field }
            | Self::Missing { field }
            | Self::InvalidNumber { field }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Validate that `value` is a positive identifier that fits in `u32`.
pub(crate) fn positive_id(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositiveId { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        value,
        max: i64::from(u32::MAX),
    })
}

/// Validate that `value` is a count that fits in `u32`.
pub(crate) fn count(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        value,
        max: i64::from(u32::MAX),
    })
}

/// Validate that `value` holds visible text and return it owned.
pub(crate) fn non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankText { field });
    }
    Ok(value.to_owned())
}
