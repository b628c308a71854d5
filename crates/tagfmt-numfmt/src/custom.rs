//! Custom numeric patterns such as `#,##0.00`, `+0.#;-0.#;0` or `0.0E+00`.
//!
//! A pattern holds up to three `;`-separated sections: positive, negative
//! and zero. Inside a section:
//!
//! | Char | Meaning |
//! |------|---------|
//! | `0` | digit, or zero when absent |
//! | `#` | digit, only when significant |
//! | `.` | decimal point (first one only) |
//! | `,` | thousands separator between integral placeholders, or /1000 scaling right before the point |
//! | `%` | multiply by 100, print the percent symbol |
//! | `‰` | multiply by 1000, print the per-mille symbol |
//! | `E0` `E+0` `E-0` | scientific notation, minimum exponent digits |
//! | `\c` | literal `c` |
//! | `'..'` `".."` | literal text |

use crate::decimal::Decimal;
use crate::error::{FormatError, Result};
use crate::NumberLocale;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Zero,
    Hash,
    Point,
    Percent,
    PerMille,
    Exponent { upper: bool, always_sign: bool, min_digits: usize },
    Literal(String),
}

/// One parsed section of a custom pattern.
#[derive(Debug, Clone, Default)]
struct Section {
    tokens: Vec<Token>,
    /// Digit placeholders before the point (or exponent).
    integral_slots: usize,
    /// Placeholders from the first `0` to the point.
    min_integral: usize,
    /// Placeholders after the point.
    max_fraction: usize,
    /// Placeholders up to the last `0` after the point.
    min_fraction: usize,
    grouping: bool,
    /// Number of scaling commas (each divides by 1000).
    scale_commas: usize,
    /// Net power of ten applied by `%` and `‰`.
    multiplier: i32,
    scientific: bool,
}

impl Section {
    fn parse(source: &str, offset: usize) -> Result<Self> {
        let mut section = Section::default();
        let mut chars = source.char_indices().peekable();
        let mut seen_point = false;
        let mut seen_integral_digit = false;
        let mut first_zero: Option<usize> = None;
        let mut pending_commas = 0usize;

        while let Some((idx, c)) = chars.next() {
            match c {
                '0' | '#' if !section.scientific => {
                    let token = if c == '0' { Token::Zero } else { Token::Hash };
                    if seen_point {
                        section.max_fraction += 1;
                        if c == '0' {
                            section.min_fraction = section.max_fraction;
                        }
                    } else {
                        if pending_commas > 0 && seen_integral_digit {
                            section.grouping = true;
                        }
                        pending_commas = 0;
                        if c == '0' && first_zero.is_none() {
                            first_zero = Some(section.integral_slots);
                        }
                        section.integral_slots += 1;
                        seen_integral_digit = true;
                    }
                    section.tokens.push(token);
                }
                '.' if !seen_point && !section.scientific => {
                    seen_point = true;
                    section.scale_commas = pending_commas;
                    pending_commas = 0;
                    section.tokens.push(Token::Point);
                }
                ',' => {
                    if !seen_point && !section.scientific && seen_integral_digit {
                        pending_commas += 1;
                    }
                }
                '%' => {
                    section.multiplier += 2;
                    section.tokens.push(Token::Percent);
                }
                '‰' => {
                    section.multiplier += 3;
                    section.tokens.push(Token::PerMille);
                }
                'E' | 'e' if !section.scientific => {
                    let mut lookahead = chars.clone();
                    let mut always_sign = false;
                    if let Some(&(_, sign)) = lookahead.peek() {
                        if sign == '+' || sign == '-' {
                            always_sign = sign == '+';
                            lookahead.next();
                        }
                    }
                    let mut min_digits = 0;
                    while let Some(&(_, '0')) = lookahead.peek() {
                        min_digits += 1;
                        lookahead.next();
                    }
                    if min_digits > 0 {
                        if !seen_point {
                            section.scale_commas = pending_commas;
                            pending_commas = 0;
                        }
                        section.scientific = true;
                        chars = lookahead;
                        section.tokens.push(Token::Exponent {
                            upper: c == 'E',
                            always_sign,
                            min_digits,
                        });
                    } else {
                        push_literal(&mut section.tokens, c);
                    }
                }
                '\\' => {
                    if let Some((_, escaped)) = chars.next() {
                        push_literal(&mut section.tokens, escaped);
                    }
                }
                '\'' | '"' => {
                    let quote = c;
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == quote {
                            closed = true;
                            break;
                        }
                        push_literal(&mut section.tokens, inner);
                    }
                    if !closed {
                        return Err(FormatError::UnterminatedLiteral(offset + idx));
                    }
                }
                _ => push_literal(&mut section.tokens, c),
            }
        }

        if !seen_point && !section.scientific {
            section.scale_commas = pending_commas;
        }
        section.min_integral = first_zero
            .map(|pos| section.integral_slots - pos)
            .unwrap_or(0);

        Ok(section)
    }

    fn has_digits(&self) -> bool {
        self.integral_slots > 0 || self.max_fraction > 0
    }

    /// Scales and rounds `value` for this section.
    fn prepare(&self, value: f64) -> Decimal {
        let mut decimal = Decimal::from_f64(value);
        decimal.shift(self.multiplier - 3 * self.scale_commas as i32);
        if self.scientific {
            decimal.round_significant(self.integral_slots.max(1) + self.max_fraction);
        } else {
            decimal.round_fraction(self.max_fraction);
        }
        decimal
    }

    fn render(&self, decimal: &Decimal, locale: &NumberLocale) -> String {
        let (integral, fraction, exponent) = if self.scientific {
            let slots = self.integral_slots.max(1);
            let digits = decimal.significant_digits(slots + self.max_fraction);
            let (int_part, frac_part) = digits.split_at(slots);
            let exponent = if decimal.is_zero() {
                0
            } else {
                decimal.exponent() - (slots as i32 - 1)
            };
            let frac = trim_fraction(frac_part, self.min_fraction);
            (strip_leading_zeros(int_part, self.min_integral), frac, exponent)
        } else {
            let mut integral = decimal.integral_digits();
            while integral.len() < self.min_integral {
                integral.insert(0, '0');
            }
            let mut fraction = decimal.fraction_digits();
            while fraction.len() < self.min_fraction {
                fraction.push('0');
            }
            (integral, fraction, 0)
        };

        let int_bytes = integral.as_bytes();
        let extra = int_bytes.len() as i64 - self.integral_slots as i64;
        let group = if self.grouping { locale.group_size } else { 0 };

        let mut out = String::new();
        let mut slot = 0usize;
        let mut frac_slot = 0usize;
        let mut in_fraction = false;
        let mut done_exponent = false;

        for token in &self.tokens {
            match token {
                Token::Zero | Token::Hash if !in_fraction && !done_exponent => {
                    let end = slot as i64 + extra;
                    let start = if slot == 0 { 0 } else { end };
                    for pos in start.max(0)..=end {
                        let pos = pos as usize;
                        if let Some(&b) = int_bytes.get(pos) {
                            out.push(char::from(b));
                            let from_right = int_bytes.len() - 1 - pos;
                            if group > 0 && from_right > 0 && from_right % group == 0 {
                                out.push_str(&locale.group_separator);
                            }
                        }
                    }
                    slot += 1;
                }
                Token::Zero | Token::Hash if !done_exponent => {
                    if let Some(c) = fraction.chars().nth(frac_slot) {
                        out.push(c);
                    }
                    frac_slot += 1;
                }
                Token::Zero | Token::Hash => {}
                Token::Point => {
                    in_fraction = true;
                    if self.integral_slots == 0 {
                        out.push_str(&integral);
                    }
                    if !fraction.is_empty() {
                        out.push_str(&locale.decimal_separator);
                    }
                }
                Token::Percent => out.push_str(&locale.percent_symbol),
                Token::PerMille => out.push_str(&locale.per_mille_symbol),
                Token::Exponent {
                    upper,
                    always_sign,
                    min_digits,
                } => {
                    done_exponent = true;
                    out.push(if *upper { 'E' } else { 'e' });
                    if exponent < 0 {
                        out.push_str(&locale.negative_sign);
                    } else if *always_sign {
                        out.push_str(&locale.positive_sign);
                    }
                    out.push_str(&format!(
                        "{:0width$}",
                        exponent.unsigned_abs(),
                        width = *min_digits
                    ));
                }
                Token::Literal(text) => out.push_str(text),
            }
        }

        out
    }
}

fn push_literal(tokens: &mut Vec<Token>, c: char) {
    if let Some(Token::Literal(text)) = tokens.last_mut() {
        text.push(c);
    } else {
        tokens.push(Token::Literal(c.to_string()));
    }
}

fn trim_fraction(digits: &str, min: usize) -> String {
    let trimmed = digits.trim_end_matches('0');
    let mut out = trimmed.to_string();
    while out.len() < min && out.len() < digits.len() {
        out.push('0');
    }
    out
}

fn strip_leading_zeros(digits: &str, min: usize) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut out = trimmed.to_string();
    while out.len() < min {
        out.insert(0, '0');
    }
    out
}

/// Splits on `;` outside quotes and escapes, keeping byte offsets.
fn split_sections(pattern: &str) -> Vec<(usize, &str)> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\\') => escaped = true,
            (None, '\'' | '"') => quote = Some(c),
            (None, ';') => {
                sections.push((start, &pattern[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }
    sections.push((start, &pattern[start..]));
    sections
}

/// Section at `index`, or the first section when it is missing or empty.
fn pick<'a>(sources: &[(usize, &str)], sections: &'a [Section], index: usize) -> &'a Section {
    match (sources.get(index), sections.get(index)) {
        (Some((_, src)), Some(section)) if !src.is_empty() => section,
        _ => &sections[0],
    }
}

/// Formats `value` with a custom pattern.
///
/// Non-finite values print the locale's symbols. A negative value printed
/// through the first section gets the locale's negative sign in front;
/// an explicit negative section prints exactly what it says. A nonzero
/// value that rounds to zero is printed through the zero section when one
/// exists, and never carries a minus sign.
pub fn format_custom(value: f64, pattern: &str, locale: &NumberLocale) -> Result<String> {
    if let Some(special) = crate::non_finite(value, locale) {
        return Ok(special);
    }

    let sources = split_sections(pattern);
    let sections = sources
        .iter()
        .map(|(offset, src)| Section::parse(src, *offset))
        .collect::<Result<Vec<_>>>()?;

    let has_negative = sources.get(1).is_some_and(|(_, src)| !src.is_empty());
    let has_zero = sources.get(2).is_some_and(|(_, src)| !src.is_empty());

    if value == 0.0 {
        let section = pick(&sources, &sections, 2);
        return Ok(section.render(&Decimal::zero(), locale));
    }

    let negative = value < 0.0;
    let section = if negative { pick(&sources, &sections, 1) } else { pick(&sources, &sections, 0) };
    let decimal = section.prepare(value);

    if decimal.is_zero() && section.has_digits() {
        let section = if has_zero { pick(&sources, &sections, 2) } else { section };
        return Ok(section.render(&Decimal::zero(), locale));
    }

    let body = section.render(&decimal, locale);
    if negative && !has_negative {
        Ok(format!("{}{}", locale.negative_sign, body))
    } else {
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64, pattern: &str) -> String {
        format_custom(value, pattern, &NumberLocale::default()).unwrap()
    }

    mod digits {
        use super::*;

        #[test]
        fn zero_placeholders_pad() {
            assert_eq!(fmt(5.0, "000"), "005");
            assert_eq!(fmt(1.5, "0.00"), "1.50");
            assert_eq!(fmt(0.5, "0.0"), "0.5");
        }

        #[test]
        fn hash_placeholders_are_optional() {
            assert_eq!(fmt(1.0, "0.##"), "1");
            assert_eq!(fmt(1.25, "0.##"), "1.25");
            assert_eq!(fmt(1.256, "0.##"), "1.26");
            assert_eq!(fmt(0.5, "#.#"), ".5");
            assert_eq!(fmt(0.0, "#"), "");
        }

        #[test]
        fn no_integral_placeholders() {
            assert_eq!(fmt(12.5, ".00"), "12.50");
            assert_eq!(fmt(0.5, ".00"), ".50");
        }

        #[test]
        fn extra_integral_digits_go_to_first_slot() {
            assert_eq!(fmt(12345.0, "0"), "12345");
            assert_eq!(fmt(12345.0, "#0.0"), "12345.0");
        }

        #[test]
        fn rounds_half_away_from_zero() {
            assert_eq!(fmt(2.5, "0"), "3");
            assert_eq!(fmt(-2.5, "0"), "-3");
            assert_eq!(fmt(0.125, "0.00"), "0.13");
        }
    }

    mod grouping {
        use super::*;

        #[test]
        fn thousands_separator() {
            assert_eq!(fmt(1234.0, "#,0"), "1,234");
            assert_eq!(fmt(1234567.891, "#,##0.00"), "1,234,567.89");
            assert_eq!(fmt(999.0, "#,0"), "999");
            assert_eq!(fmt(-1234.0, "#,0"), "-1,234");
        }

        #[test]
        fn custom_group_separator() {
            let locale = NumberLocale::default()
                .group_separator(" ")
                .decimal_separator(",");
            assert_eq!(
                format_custom(1234567.5, "#,0.0", &locale).unwrap(),
                "1 234 567,5"
            );
        }

        #[test]
        fn trailing_commas_scale() {
            assert_eq!(fmt(1234567.0, "0,,"), "1");
            assert_eq!(fmt(1500000.0, "0.0,,"), "1500000.0");
            assert_eq!(fmt(1500000.0, "0,,.0"), "1.5");
            assert_eq!(fmt(2500.0, "#,0,"), "3");
        }
    }

    mod sections {
        use super::*;

        #[test]
        fn sign_triple() {
            assert_eq!(fmt(1.5, "+0.#;-0.#;0"), "+1.5");
            assert_eq!(fmt(-1.5, "+0.#;-0.#;0"), "-1.5");
            assert_eq!(fmt(0.0, "+0.#;-0.#;0"), "0");
            assert_eq!(fmt(2.0, "+0.#;-0.#;0"), "+2");
        }

        #[test]
        fn rounding_to_zero_uses_zero_section() {
            assert_eq!(fmt(0.04, "+0.#;-0.#;zero"), "zero");
            assert_eq!(fmt(-0.04, "+0.#;-0.#;zero"), "zero");
        }

        #[test]
        fn rounding_to_zero_drops_minus() {
            assert_eq!(fmt(-0.004, "0.00"), "0.00");
        }

        #[test]
        fn negative_section_has_no_implicit_sign() {
            assert_eq!(fmt(-5.0, "0;(0)"), "(5)");
            assert_eq!(fmt(5.0, "0;(0)"), "5");
        }

        #[test]
        fn empty_sections_fall_back_to_first() {
            assert_eq!(fmt(-5.0, "0.0;;zero"), "-5.0");
            assert_eq!(fmt(0.0, "0.0;(0);"), "0.0");
        }

        #[test]
        fn quoted_semicolon_is_literal() {
            assert_eq!(fmt(3.0, "0';'"), "3;");
            assert_eq!(fmt(3.0, "0\\;"), "3;");
        }
    }

    mod symbols {
        use super::*;

        #[test]
        fn percent_multiplies() {
            assert_eq!(fmt(0.25, "0%"), "25%");
            assert_eq!(fmt(0.07, "0.0%"), "7.0%");
            assert_eq!(fmt(0.25, "+0.#%;-0.#%;0%"), "+25%");
            assert_eq!(fmt(0.0, "+0.#%;-0.#%;0%"), "0%");
        }

        #[test]
        fn per_mille_multiplies() {
            assert_eq!(fmt(0.0125, "0.#‰"), "12.5‰");
        }

        #[test]
        fn literals_and_escapes() {
            assert_eq!(fmt(42.0, "'#'0"), "#42");
            assert_eq!(fmt(42.0, "\\#0"), "#42");
            assert_eq!(fmt(42.0, "0 \"units\""), "42 units");
            assert_eq!(fmt(5.0, "x0y"), "x5y");
        }

        #[test]
        fn literal_between_digits() {
            assert_eq!(fmt(123456789.0, "000-00-0000"), "123-45-6789");
            assert_eq!(fmt(12345678.0, "000-00-0000"), "012-34-5678");
        }

        #[test]
        fn unterminated_quote_is_error() {
            let err = format_custom(1.0, "0 'abc", &NumberLocale::default()).unwrap_err();
            assert_eq!(err, FormatError::UnterminatedLiteral(2));
        }

        #[test]
        fn pattern_without_digits() {
            assert_eq!(fmt(5.0, "abc"), "abc");
            assert_eq!(fmt(-5.0, "abc"), "-abc");
        }
    }

    mod scientific {
        use super::*;

        #[test]
        fn exponent_notation() {
            assert_eq!(fmt(1234.0, "0.0E+0"), "1.2E+3");
            assert_eq!(fmt(1234.0, "0.###E+000"), "1.234E+003");
            assert_eq!(fmt(0.00012, "0.0e0"), "1.2e-4");
            assert_eq!(fmt(1234.0, "00.0E+0"), "12.3E+2");
        }

        #[test]
        fn exponent_sign_minus_only() {
            assert_eq!(fmt(1234.0, "0E-0"), "1E3");
            assert_eq!(fmt(0.5, "0E-0"), "5E-1");
        }

        #[test]
        fn zero_in_scientific() {
            assert_eq!(fmt(0.0, "0.0E+00"), "0.0E+00");
        }

        #[test]
        fn bare_e_is_literal() {
            assert_eq!(fmt(5.0, "0 E"), "5 E");
        }
    }

    mod special {
        use super::*;

        #[test]
        fn non_finite_values() {
            assert_eq!(fmt(f64::NAN, "0.00"), "NaN");
            assert_eq!(fmt(f64::INFINITY, "0.00"), "Infinity");
            assert_eq!(fmt(f64::NEG_INFINITY, "0.00"), "-Infinity");
        }
    }
}
