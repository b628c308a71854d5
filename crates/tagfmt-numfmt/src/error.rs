//! Error types for the numeric formatter.

use thiserror::Error;

/// Errors that can occur when formatting a number with a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Standard format letter that this formatter does not know.
    #[error("unknown standard format specifier '{0}'")]
    UnknownSpecifier(char),

    /// Precision digits after a standard format letter are out of range.
    #[error("precision {precision} is out of range for '{specifier}' (max {max})")]
    PrecisionOutOfRange {
        specifier: char,
        precision: u32,
        max: u32,
    },

    /// Integer-only format (`D`, `X`) applied to a value that is not integral.
    #[error("format '{specifier}' requires an integral value, got {value}")]
    IntegralRequired { specifier: char, value: f64 },

    /// Hexadecimal format applied to a negative value.
    #[error("format '{specifier}' requires a non-negative value, got {value}")]
    NegativeNotAllowed { specifier: char, value: f64 },

    /// Integral value too large for the hexadecimal format.
    #[error("format '{specifier}' supports values below 2^64, got {value}")]
    OutOfRange { specifier: char, value: f64 },

    /// A quoted literal was opened but never closed.
    #[error("unterminated quoted literal starting at byte {0}")]
    UnterminatedLiteral(usize),
}

/// Result type for formatting operations.
pub type Result<T> = std::result::Result<T, FormatError>;
