//! Splits template text into literal and directive spans.
//!
//! A directive opens at a `[` and closes at the first following `]`; a
//! bracket immediately preceded by a backslash never delimits. An unescaped
//! `[` met before the close restarts the directive there, so the earlier
//! bracket stays literal. Escapes are left in place; unescaping happens on
//! the rendered output.

use std::iter::FusedIterator;
use std::ops::Range;

/// One piece of template text. Concatenating all spans of a template, in
/// order, reproduces it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Text outside any directive. Never empty.
    Literal(&'a str),
    /// A directive including its brackets: `[key:fmt]`.
    Directive(&'a str),
}

impl<'a> Span<'a> {
    /// The span's source text.
    pub fn text(&self) -> &'a str {
        match self {
            Span::Literal(text) | Span::Directive(text) => text,
        }
    }

    /// True for a bracketed directive span.
    pub fn is_directive(&self) -> bool {
        matches!(self, Span::Directive(_))
    }
}

/// Returns the spans of `text`, lazily, left to right.
///
/// Empty input yields no spans; input without directives yields a single
/// literal span.
pub fn tokenize(text: &str) -> Spans<'_> {
    Spans::new(text)
}

/// Iterator over the spans of a template. See [`tokenize`].
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    input: &'a str,
    pos: usize,
    /// Directive found while emitting the literal that precedes it.
    pending: Option<Range<usize>>,
}

impl<'a> Spans<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending: None,
        }
    }

    /// Byte range of the next directive starting at or after `from`.
    fn find_directive(&self, from: usize) -> Option<Range<usize>> {
        let bytes = self.input.as_bytes();
        let mut open = None;

        for i in from..bytes.len() {
            match bytes[i] {
                b'[' if !is_escaped(bytes, i) => open = Some(i),
                b']' if !is_escaped(bytes, i) => {
                    if let Some(start) = open {
                        return Some(start..i + 1);
                    }
                }
                _ => {}
            }
        }

        None
    }
}

fn is_escaped(bytes: &[u8], i: usize) -> bool {
    i > 0 && bytes[i - 1] == b'\\'
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(range) = self.pending.take() {
            self.pos = range.end;
            return Some(Span::Directive(&self.input[range]));
        }

        if self.pos >= self.input.len() {
            return None;
        }

        match self.find_directive(self.pos) {
            Some(range) if range.start > self.pos => {
                let text = &self.input[self.pos..range.start];
                self.pos = range.start;
                self.pending = Some(range);
                Some(Span::Literal(text))
            }
            Some(range) => {
                self.pos = range.end;
                Some(Span::Directive(&self.input[range]))
            }
            None => {
                let text = &self.input[self.pos..];
                self.pos = self.input.len();
                Some(Span::Literal(text))
            }
        }
    }
}

impl FusedIterator for Spans<'_> {}
