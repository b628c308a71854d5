//! Locale symbols used when parsing and printing numbers.

use serde::Deserialize;

/// Separators and symbols that vary between number cultures.
///
/// The default is an English-style locale: `.` for decimals, `,` for
/// thousands in groups of three, `$` for currency.
///
/// Every field is optional when deserializing, so a config file only has
/// to name what it changes:
///
/// ```yaml
/// decimal_separator: ","
/// group_separator: "."
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NumberLocale {
    pub decimal_separator: String,
    pub group_separator: String,
    pub group_size: usize,
    pub negative_sign: String,
    pub positive_sign: String,
    pub percent_symbol: String,
    pub per_mille_symbol: String,
    pub currency_symbol: String,
    pub nan_symbol: String,
    pub infinity_symbol: String,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            group_size: 3,
            negative_sign: "-".to_string(),
            positive_sign: "+".to_string(),
            percent_symbol: "%".to_string(),
            per_mille_symbol: "‰".to_string(),
            currency_symbol: "$".to_string(),
            nan_symbol: "NaN".to_string(),
            infinity_symbol: "Infinity".to_string(),
        }
    }
}

impl NumberLocale {
    /// Creates the default locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decimal separator.
    pub fn decimal_separator(mut self, sep: impl Into<String>) -> Self {
        self.decimal_separator = sep.into();
        self
    }

    /// Sets the thousands separator.
    pub fn group_separator(mut self, sep: impl Into<String>) -> Self {
        self.group_separator = sep.into();
        self
    }

    /// Sets the number of digits per group. Zero disables grouping.
    pub fn group_size(mut self, size: usize) -> Self {
        self.group_size = size;
        self
    }

    /// Sets the currency symbol used by the `C` standard format.
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Sets the percent symbol used by `%` and the `P` standard format.
    pub fn percent_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.percent_symbol = symbol.into();
        self
    }

    /// Parses text as a floating-point number.
    ///
    /// Surrounding whitespace is ignored. Group separators in the integral
    /// part are accepted (`1,234.5`), and the locale's decimal separator is
    /// honored. NaN and the infinities are recognized only in this
    /// locale's spelling (`NaN`, `Infinity`, `-Infinity`). Returns `None`
    /// when the text is not a number.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let unsigned = trimmed.trim_start_matches(['+', '-']);
        if unsigned.starts_with(|c: char| c.is_alphabetic()) {
            return self.parse_symbol(trimmed);
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            if self.decimal_separator == "." || !trimmed.contains('.') {
                return Some(value);
            }
        }

        let (integral, fraction) = match trimmed.split_once(self.decimal_separator.as_str()) {
            Some((i, f)) => (i, Some(f)),
            None => (trimmed, None),
        };

        let integral = if self.group_separator.is_empty() {
            integral.to_string()
        } else {
            strip_groups(integral, &self.group_separator)?
        };

        let normalized = match fraction {
            Some(f) => format!("{}.{}", integral, f),
            None => integral,
        };
        normalized.parse::<f64>().ok()
    }

    fn parse_symbol(&self, text: &str) -> Option<f64> {
        if text == self.nan_symbol {
            return Some(f64::NAN);
        }
        if text == self.infinity_symbol {
            return Some(f64::INFINITY);
        }
        if let Some(rest) = text.strip_prefix(self.positive_sign.as_str()) {
            if rest == self.infinity_symbol {
                return Some(f64::INFINITY);
            }
        }
        match text.strip_prefix(self.negative_sign.as_str()) {
            Some(rest) if rest == self.infinity_symbol => Some(f64::NEG_INFINITY),
            _ => None,
        }
    }
}

/// Removes group separators that sit between digits. A separator anywhere
/// else (leading, trailing, doubled) makes the text invalid.
fn strip_groups(integral: &str, sep: &str) -> Option<String> {
    if !integral.contains(sep) {
        return Some(integral.to_string());
    }

    let mut out = String::with_capacity(integral.len());
    let mut parts = integral.split(sep);
    let first = parts.next()?;
    if !first.ends_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    out.push_str(first);
    for part in parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        out.push_str(part);
    }
    Some(out)
}
