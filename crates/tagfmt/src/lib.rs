//! Bracket placeholder templates with chained formats.
//!
//! A template is plain text with directives of the form
//! `[key:format:format...]`. Each directive's key is handed to a
//! [`Resolver`], and the resolved value runs through the formats left to
//! right.
//!
//! # Example
//!
//! ```rust
//! use tagfmt::render;
//!
//! let out = render("Gold [gold:#,0], bonus [bonus:StatPercent]", |key: &str| {
//!     match key {
//!         "gold" => "12500".to_string(),
//!         "bonus" => "0.15".to_string(),
//!         _ => String::new(),
//!     }
//! });
//! assert_eq!(out, "Gold 12,500, bonus +15%");
//! ```
//!
//! # Formats
//!
//! | Format | Result for `x` |
//! |--------|----------------|
//! | `Abs` | `abs(x)` |
//! | `OneMinus` | `1 - x` |
//! | `MinusOne` | `x - 1` |
//! | `Negate` | `-x` |
//! | `Stat` | `+1.5`, `-1.5`, `0` |
//! | `StatPercent` | `+25%`, `-2.5%`, `0%` |
//! | anything else | numeric pattern: `#,0`, `0.00`, `+0;-0;0`, `N2`, `P1`, ... |
//!
//! Names match case-insensitively. A value that is not a number skips
//! numeric formats and flows unchanged into the next one.
//!
//! # Escaping
//!
//! `\[` and `\]` never open or close a directive, and are printed as `[`
//! and `]` in the output. A directive with nothing inside (`[]`) is printed
//! as written.

mod directive;
mod format;
mod render;
mod resolver;
mod span;

pub use directive::{Directive, Parsed};
pub use format::{
    apply_format, default_locale, ExtendedFormat, STAT_PATTERN, STAT_PERCENT_PATTERN,
};
pub use render::{unescape, Renderer};
pub use resolver::{MapResolver, Resolver, UnknownKeyBehavior};
pub use span::{tokenize, Span, Spans};
pub use tagfmt_numfmt::{FormatError, NumberLocale};

/// Renders `text` with the default locale.
///
/// Shorthand for [`Renderer::render`] on a default [`Renderer`].
pub fn render(text: &str, mut resolver: impl Resolver) -> String {
    Renderer::default().render(text, &mut resolver)
}
