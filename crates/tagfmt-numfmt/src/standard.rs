//! Standard single-letter formats: `C`, `D`, `E`, `F`, `G`, `N`, `P`, `R`, `X`,
//! each optionally followed by a precision (`F2`, `N0`, `E3`, `D5`).

use crate::decimal::Decimal;
use crate::error::{FormatError, Result};
use crate::NumberLocale;

const MAX_PRECISION: u32 = 99;

/// Shortest-form general notation switches to scientific outside this
/// exponent range.
const GENERAL_MIN_EXPONENT: i32 = -5;
const GENERAL_MAX_EXPONENT: i32 = 15;

/// Significant digits of the general form.
const GENERAL_PRECISION: usize = 15;

/// First integral value the hexadecimal format cannot represent (2^64).
const HEX_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A parsed standard format: letter plus optional precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFormat {
    pub letter: char,
    pub precision: Option<u32>,
}

impl StandardFormat {
    /// Recognizes `letter` + up to nine digits. Anything else is a custom
    /// pattern, so this returns `None` rather than an error.
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut chars = pattern.chars();
        let letter = chars.next().filter(char::is_ascii_alphabetic)?;
        let rest = chars.as_str();
        if rest.len() > 9 || !rest.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let precision = if rest.is_empty() {
            None
        } else {
            Some(rest.parse().ok()?)
        };
        Some(Self { letter, precision })
    }

    /// Formats a finite value.
    pub fn format(&self, value: f64, locale: &NumberLocale) -> Result<String> {
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(FormatError::PrecisionOutOfRange {
                    specifier: self.letter,
                    precision,
                    max: MAX_PRECISION,
                });
            }
        }

        let negative = value < 0.0;
        let places = |default: u32| self.precision.unwrap_or(default) as usize;

        let (body, rounded_zero) = match self.letter.to_ascii_uppercase() {
            'F' => fixed(value, places(2), false, 0, locale),
            'N' => fixed(value, places(2), true, 0, locale),
            'P' => {
                let (body, zero) = fixed(value, places(2), true, 2, locale);
                (format!("{}{}", body, locale.percent_symbol), zero)
            }
            'C' => {
                let (body, zero) = fixed(value, places(2), true, 0, locale);
                (format!("{}{}", locale.currency_symbol, body), zero)
            }
            'E' => {
                let upper = self.letter == 'E';
                let mut decimal = Decimal::from_f64(value);
                decimal.round_significant(places(6) + 1);
                let body = scientific(&decimal, Some(places(6)), upper, 3, locale);
                (body, decimal.is_zero())
            }
            'G' => match self.precision {
                None | Some(0) => return Ok(format_general(value, locale)),
                Some(p) => {
                    let mut decimal = Decimal::from_f64(value);
                    decimal.round_significant(p as usize);
                    let body = general(&decimal, p as i32, self.letter == 'G', locale);
                    (body, decimal.is_zero())
                }
            },
            'R' => return Ok(format_round_trip(value, locale)),
            'D' => {
                if value.fract() != 0.0 {
                    return Err(FormatError::IntegralRequired {
                        specifier: self.letter,
                        value,
                    });
                }
                let mut digits = Decimal::from_f64(value).integral_digits();
                while digits.len() < places(1).max(1) {
                    digits.insert(0, '0');
                }
                (digits, value == 0.0)
            }
            'X' => {
                if value.fract() != 0.0 {
                    return Err(FormatError::IntegralRequired {
                        specifier: self.letter,
                        value,
                    });
                }
                if negative {
                    return Err(FormatError::NegativeNotAllowed {
                        specifier: self.letter,
                        value,
                    });
                }
                if value >= HEX_LIMIT {
                    return Err(FormatError::OutOfRange {
                        specifier: self.letter,
                        value,
                    });
                }
                let width = places(1);
                let hex = if self.letter == 'X' {
                    format!("{:0width$X}", value as u64, width = width)
                } else {
                    format!("{:0width$x}", value as u64, width = width)
                };
                return Ok(hex);
            }
            other => return Err(FormatError::UnknownSpecifier(other)),
        };

        if negative && !rounded_zero {
            Ok(format!("{}{}", locale.negative_sign, body))
        } else {
            Ok(body)
        }
    }
}

/// Fixed-point body without sign. `shift` scales by a power of ten first.
/// Also reports whether the value rounded to zero.
fn fixed(
    value: f64,
    places: usize,
    grouping: bool,
    shift: i32,
    locale: &NumberLocale,
) -> (String, bool) {
    let mut decimal = Decimal::from_f64(value);
    decimal.shift(shift);
    decimal.round_fraction(places);

    let mut integral = decimal.integral_digits();
    if integral.is_empty() {
        integral.push('0');
    }
    let mut out = if grouping {
        group_digits(&integral, locale)
    } else {
        integral
    };

    if places > 0 {
        let mut fraction = decimal.fraction_digits();
        while fraction.len() < places {
            fraction.push('0');
        }
        out.push_str(&locale.decimal_separator);
        out.push_str(&fraction);
    }

    (out, decimal.is_zero())
}

fn group_digits(integral: &str, locale: &NumberLocale) -> String {
    let size = locale.group_size;
    if size == 0 || integral.len() <= size {
        return integral.to_string();
    }
    let mut out = String::with_capacity(integral.len() + integral.len() / size);
    for (i, c) in integral.chars().enumerate() {
        let from_right = integral.len() - i;
        if i > 0 && from_right % size == 0 {
            out.push_str(&locale.group_separator);
        }
        out.push(c);
    }
    out
}

/// `d.ddd` mantissa plus signed exponent. With `fraction_len` the mantissa
/// is padded to exactly that many decimals; without it trailing zeros go.
fn scientific(
    decimal: &Decimal,
    fraction_len: Option<usize>,
    upper: bool,
    exponent_digits: usize,
    locale: &NumberLocale,
) -> String {
    let digits = decimal.significant_digits(1 + fraction_len.unwrap_or(0));
    let (lead, rest) = digits.split_at(1);
    let rest = match fraction_len {
        Some(len) => rest[..len.min(rest.len())].to_string(),
        None => rest.trim_end_matches('0').to_string(),
    };

    let mut out = lead.to_string();
    if !rest.is_empty() {
        out.push_str(&locale.decimal_separator);
        out.push_str(&rest);
    }
    out.push(if upper { 'E' } else { 'e' });
    let exponent = decimal.exponent();
    out.push_str(if exponent < 0 {
        &locale.negative_sign
    } else {
        &locale.positive_sign
    });
    out.push_str(&format!(
        "{:0width$}",
        exponent.unsigned_abs(),
        width = exponent_digits
    ));
    out
}

/// General notation: fixed when the exponent is within range, scientific
/// otherwise. Trailing zeros are never printed.
fn general(decimal: &Decimal, max_exponent: i32, upper: bool, locale: &NumberLocale) -> String {
    let exponent = decimal.exponent();
    if exponent > GENERAL_MIN_EXPONENT && exponent < max_exponent {
        let mut out = decimal.integral_digits();
        if out.is_empty() {
            out.push('0');
        }
        let fraction = decimal.fraction_digits();
        if !fraction.is_empty() {
            out.push_str(&locale.decimal_separator);
            out.push_str(&fraction);
        }
        out
    } else {
        scientific(decimal, None, upper, 2, locale)
    }
}

/// Default string form of a number: at most 15 significant digits.
///
/// Binary noise past the fifteenth digit is rounded away (`1 - 0.9` prints
/// `0.1`). Integral values print without a fractional part, very large or
/// very small magnitudes switch to `E` notation (`1E+15`, `1E-05`), and
/// negative zero prints as `0`.
pub fn format_general(value: f64, locale: &NumberLocale) -> String {
    signed_general(value, Some(GENERAL_PRECISION), locale)
}

/// Shortest representation that parses back to exactly `value`.
pub fn format_round_trip(value: f64, locale: &NumberLocale) -> String {
    signed_general(value, None, locale)
}

fn signed_general(value: f64, precision: Option<usize>, locale: &NumberLocale) -> String {
    if let Some(special) = crate::non_finite(value, locale) {
        return special;
    }
    let mut decimal = Decimal::from_f64(value);
    if let Some(precision) = precision {
        decimal.round_significant(precision);
    }
    let body = general(&decimal, GENERAL_MAX_EXPONENT, true, locale);
    if value < 0.0 {
        format!("{}{}", locale.negative_sign, body)
    } else {
        body
    }
}
