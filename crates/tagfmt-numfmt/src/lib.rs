//! Numeric format patterns for template output.
//!
//! This crate turns a floating-point value and a short pattern string into
//! text. Two pattern families are understood:
//!
//! - **Standard formats**: a single letter with an optional precision,
//!   e.g. `F2` (fixed), `N0` (grouped), `P1` (percent), `E3`
//!   (scientific), `G` (general), `C` (currency), `D5`/`X` (integers).
//! - **Custom patterns**: digit placeholders and literals, e.g. `#,0`,
//!   `0.##`, `+0.#;-0.#;0`, `0.0E+00`, `0%`.
//!
//! # Example
//!
//! ```rust
//! use tagfmt_numfmt::{format_number, NumberLocale};
//!
//! let locale = NumberLocale::default();
//! assert_eq!(format_number(1234.0, "#,0", &locale).unwrap(), "1,234");
//! assert_eq!(format_number(1.5, "+0.#;-0.#;0", &locale).unwrap(), "+1.5");
//! assert_eq!(format_number(0.25, "P0", &locale).unwrap(), "25%");
//! ```
//!
//! Rounding is half away from zero, applied to the shortest decimal form of
//! the value, so `2.675` with `0.00` prints `2.68`.

mod custom;
mod decimal;
mod error;
mod locale;
mod standard;

pub use custom::format_custom;
pub use error::{FormatError, Result};
pub use locale::NumberLocale;
pub use standard::{format_general, format_round_trip, StandardFormat};

/// Formats `value` with `pattern`.
///
/// An empty pattern gives the general form (15 significant digits). A letter followed
/// only by digits is a standard format; anything else is a custom pattern.
pub fn format_number(value: f64, pattern: &str, locale: &NumberLocale) -> Result<String> {
    if pattern.is_empty() {
        return Ok(format_general(value, locale));
    }
    if let Some(special) = non_finite(value, locale) {
        return Ok(special);
    }
    match StandardFormat::parse(pattern) {
        Some(standard) => standard.format(value, locale),
        None => format_custom(value, pattern, locale),
    }
}

/// Text for NaN and the infinities, `None` for finite values.
pub(crate) fn non_finite(value: f64, locale: &NumberLocale) -> Option<String> {
    if value.is_nan() {
        Some(locale.nan_symbol.clone())
    } else if value.is_infinite() {
        if value < 0.0 {
            Some(format!("{}{}", locale.negative_sign, locale.infinity_symbol))
        } else {
            Some(locale.infinity_symbol.clone())
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64, pattern: &str) -> Result<String> {
        format_number(value, pattern, &NumberLocale::default())
    }

    #[test]
    fn dispatches_standard_and_custom() {
        assert_eq!(fmt(1234.0, "N0").unwrap(), "1,234");
        assert_eq!(fmt(1234.0, "#,0").unwrap(), "1,234");
    }

    #[test]
    fn empty_pattern_is_general() {
        assert_eq!(fmt(2.50, "").unwrap(), "2.5");
        assert_eq!(fmt(1.0 - 0.9, "").unwrap(), "0.1");
    }

    #[test]
    fn non_finite_under_any_pattern() {
        assert_eq!(fmt(f64::INFINITY, "F2").unwrap(), "Infinity");
        assert_eq!(fmt(f64::NAN, "D").unwrap(), "NaN");
    }

    #[test]
    fn errors_propagate() {
        assert!(fmt(1.5, "D").is_err());
        assert!(fmt(1.0, "0 'open").is_err());
    }
}
