//! Template rendering: tokenize, resolve, format, reassemble, unescape.

use tagfmt_numfmt::NumberLocale;
use tracing::{debug, trace};

use crate::directive::{Directive, Parsed};
use crate::resolver::Resolver;
use crate::span::{tokenize, Span};

/// Renders templates with a fixed number locale.
///
/// A renderer holds no per-call state, so one instance can serve any
/// number of renders, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    locale: NumberLocale,
}

impl Renderer {
    /// Creates a renderer with the default locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locale used to parse values and print numbers.
    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Locale used to parse values and print numbers.
    pub fn locale(&self) -> &NumberLocale {
        &self.locale
    }

    /// Renders `text`, resolving each directive through `resolver`.
    ///
    /// Literal text is kept. `[]`-style directives with nothing inside are
    /// kept as written. Every other directive is replaced by its resolved
    /// value with its formats applied left to right. Finally `\[` and `\]`
    /// become `[` and `]` across the whole output.
    pub fn render<R>(&self, text: &str, resolver: &mut R) -> String
    where
        R: Resolver + ?Sized,
    {
        let mut output = String::with_capacity(text.len());

        for span in tokenize(text) {
            match span {
                Span::Literal(literal) => output.push_str(literal),
                Span::Directive(source) => match Directive::parse(source) {
                    Parsed::PassThrough => {
                        debug!(directive = source, "empty directive kept as written");
                        output.push_str(source);
                    }
                    Parsed::Directive(directive) => {
                        let value = resolver.resolve(directive.key);
                        trace!(key = directive.key, value = %value, "resolved directive");
                        output.push_str(&directive.apply(value, &self.locale));
                    }
                },
            }
        }

        unescape(&output)
    }
}

/// Replaces `\[` with `[` and `\]` with `]`.
pub fn unescape(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_string();
    }
    text.replace("\\[", "[").replace("\\]", "]")
}
