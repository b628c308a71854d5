//! Parsing of a single directive span: `[key:format:format]`.

use tagfmt_numfmt::NumberLocale;

use crate::format::ExtendedFormat;

/// A parsed directive: the key to resolve and the formats to apply, in
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub key: &'a str,
    pub formats: Vec<ExtendedFormat>,
}

/// Outcome of parsing a directive span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<'a> {
    Directive(Directive<'a>),
    /// Nothing to resolve (`[]`, `[:]`); the span is emitted as written.
    PassThrough,
}

impl<'a> Directive<'a> {
    /// Parses a directive span, brackets included.
    ///
    /// The inner text is split on `:`, dropping empty pieces, so `[a::b]`
    /// equals `[a:b]`. The first piece is the key; a key can therefore
    /// never contain a colon.
    pub fn parse(span: &'a str) -> Parsed<'a> {
        if span.len() <= 2 {
            return Parsed::PassThrough;
        }
        let Some(inner) = span.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
            return Parsed::PassThrough;
        };

        let mut pieces = inner.split(':').filter(|piece| !piece.is_empty());
        let Some(key) = pieces.next() else {
            return Parsed::PassThrough;
        };

        Parsed::Directive(Directive {
            key,
            formats: pieces.map(ExtendedFormat::parse).collect(),
        })
    }

    /// Folds the formats over `value`, left to right.
    pub fn apply(&self, value: String, locale: &NumberLocale) -> String {
        self.formats
            .iter()
            .fold(value, |current, format| format.apply(&current, locale))
    }
}
