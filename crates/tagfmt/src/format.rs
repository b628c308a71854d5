//! Format specifiers applied to resolved values.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use tagfmt_numfmt::{format_general, format_number, NumberLocale};
use tracing::debug;

/// Pattern behind [`ExtendedFormat::Stat`]: sign shown when nonzero, at
/// most one decimal.
pub const STAT_PATTERN: &str = "+0.#;-0.#;0";

/// Pattern behind [`ExtendedFormat::StatPercent`].
pub const STAT_PERCENT_PATTERN: &str = "+0.#%;-0.#%;0%";

static DEFAULT_LOCALE: Lazy<NumberLocale> = Lazy::new(NumberLocale::default);

/// One specifier of a directive's chain.
///
/// Named transforms match case-insensitively; any other specifier is kept
/// as a numeric [`Pattern`](ExtendedFormat::Pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendedFormat {
    /// `|x|`
    Abs,
    /// `1 - x`
    OneMinus,
    /// `x - 1`
    MinusOne,
    /// `-x`
    Negate,
    /// `+1.5`, `-1.5`, `0`
    Stat,
    /// `+25%`, `-2.5%`, `0%`
    StatPercent,
    /// Numeric pattern such as `#,0`, `0.00` or `N2`.
    Pattern(String),
}

impl ExtendedFormat {
    /// Resolves a specifier. Never fails: unknown names become patterns.
    pub fn parse(specifier: &str) -> Self {
        const NAMED: [(&str, ExtendedFormat); 6] = [
            ("abs", ExtendedFormat::Abs),
            ("oneminus", ExtendedFormat::OneMinus),
            ("minusone", ExtendedFormat::MinusOne),
            ("negate", ExtendedFormat::Negate),
            ("stat", ExtendedFormat::Stat),
            ("statpercent", ExtendedFormat::StatPercent),
        ];

        NAMED
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(specifier))
            .map(|(_, format)| format)
            .unwrap_or_else(|| ExtendedFormat::Pattern(specifier.to_string()))
    }

    /// Canonical spelling of the specifier.
    pub fn name(&self) -> &str {
        match self {
            ExtendedFormat::Abs => "Abs",
            ExtendedFormat::OneMinus => "OneMinus",
            ExtendedFormat::MinusOne => "MinusOne",
            ExtendedFormat::Negate => "Negate",
            ExtendedFormat::Stat => "Stat",
            ExtendedFormat::StatPercent => "StatPercent",
            ExtendedFormat::Pattern(pattern) => pattern,
        }
    }

    /// Applies this format to `value`.
    ///
    /// Values that do not parse as numbers come back unchanged, as do
    /// values whose pattern the number formatter rejects.
    pub fn apply(&self, value: &str, locale: &NumberLocale) -> String {
        let Some(number) = locale.parse(value) else {
            if !matches!(self, ExtendedFormat::Pattern(_)) {
                debug!(format = self.name(), value, "not a number, transform skipped");
            }
            return value.to_string();
        };

        let formatted = match self {
            ExtendedFormat::Abs => Ok(format_general(number.abs(), locale)),
            ExtendedFormat::OneMinus => Ok(format_general(1.0 - number, locale)),
            ExtendedFormat::MinusOne => Ok(format_general(number - 1.0, locale)),
            ExtendedFormat::Negate => Ok(format_general(-number, locale)),
            ExtendedFormat::Stat => format_number(number, STAT_PATTERN, locale),
            ExtendedFormat::StatPercent => format_number(number, STAT_PERCENT_PATTERN, locale),
            ExtendedFormat::Pattern(pattern) => format_number(number, pattern, locale),
        };

        formatted.unwrap_or_else(|err| {
            debug!(format = self.name(), value, %err, "pattern rejected, value kept");
            value.to_string()
        })
    }
}

impl FromStr for ExtendedFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ExtendedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies one specifier to a value using the default locale.
///
/// ```rust
/// use tagfmt::apply_format;
///
/// assert_eq!(apply_format("1.5", "Stat"), "+1.5");
/// assert_eq!(apply_format("0.25", "statpercent"), "+25%");
/// assert_eq!(apply_format("1234", "#,0"), "1,234");
/// assert_eq!(apply_format("n/a", "Abs"), "n/a");
/// ```
pub fn apply_format(value: &str, specifier: &str) -> String {
    ExtendedFormat::parse(specifier).apply(value, &DEFAULT_LOCALE)
}

/// Locale used when none is configured.
pub fn default_locale() -> &'static NumberLocale {
    &DEFAULT_LOCALE
}
