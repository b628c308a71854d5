//! Decimal digit representation with half-away-from-zero rounding.
//!
//! A finite `f64` magnitude is captured through its shortest round-trip
//! decimal form, so `2.675` rounds to `2.68` at two places even though the
//! binary value is slightly below the midpoint.

/// Non-negative decimal number `0.d1 d2 d3 ... × 10^point`.
///
/// `digits` never carries trailing zeros; zero is the empty digit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decimal {
    digits: Vec<u8>,
    point: i32,
}

impl Decimal {
    /// Captures the magnitude of a finite value.
    pub(crate) fn from_f64(value: f64) -> Self {
        let abs = value.abs();
        if abs == 0.0 {
            return Self::zero();
        }

        // `{:e}` prints the shortest digits that round-trip: "1.2345e3".
        let repr = format!("{:e}", abs);
        let (mantissa, exp) = repr.split_once('e').unwrap_or((repr.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();

        let mut decimal = Self {
            digits,
            point: exp + 1,
        };
        decimal.normalize();
        decimal
    }

    pub(crate) fn zero() -> Self {
        Self {
            digits: Vec::new(),
            point: 0,
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Decimal exponent of the leading digit (`1234` -> 3, `0.05` -> -2).
    pub(crate) fn exponent(&self) -> i32 {
        if self.is_zero() {
            0
        } else {
            self.point - 1
        }
    }

    /// Multiplies by `10^power`.
    pub(crate) fn shift(&mut self, power: i32) {
        if !self.is_zero() {
            self.point += power;
        }
    }

    /// Rounds to `places` digits after the decimal point.
    pub(crate) fn round_fraction(&mut self, places: usize) {
        let keep = self.point as i64 + places as i64;
        self.round_at(keep);
    }

    /// Rounds to `count` significant digits.
    pub(crate) fn round_significant(&mut self, count: usize) {
        self.round_at(count.max(1) as i64);
    }

    /// Digits before the decimal point, without leading zeros.
    /// Empty when the value is below one.
    pub(crate) fn integral_digits(&self) -> String {
        if self.point <= 0 {
            return String::new();
        }
        let point = self.point as usize;
        (0..point)
            .map(|i| char::from(b'0' + self.digits.get(i).copied().unwrap_or(0)))
            .collect()
    }

    /// Digits after the decimal point, without trailing zeros.
    pub(crate) fn fraction_digits(&self) -> String {
        let mut out = String::new();
        if self.point < 0 {
            out.extend(std::iter::repeat('0').take(self.point.unsigned_abs() as usize));
        }
        let start = self.point.max(0) as usize;
        out.extend(
            self.digits
                .iter()
                .skip(start)
                .map(|d| char::from(b'0' + d)),
        );
        out
    }

    /// All significant digits, padded with zeros to at least `len`.
    pub(crate) fn significant_digits(&self, len: usize) -> String {
        let mut out: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        while out.len() < len {
            out.push('0');
        }
        out
    }

    /// Truncates to `keep` digits and rounds half away from zero.
    fn round_at(&mut self, keep: i64) {
        if self.is_zero() || keep >= self.digits.len() as i64 {
            return;
        }
        if keep < 0 {
            *self = Self::zero();
            return;
        }

        let keep = keep as usize;
        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);

        if round_up {
            let mut carry = true;
            for digit in self.digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.point += 1;
            }
        }

        self.normalize();
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        while self.digits.first() == Some(&0) {
            self.digits.remove(0);
            self.point -= 1;
        }
        if self.digits.is_empty() {
            self.point = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(value: f64) -> (String, String) {
        let d = Decimal::from_f64(value);
        (d.integral_digits(), d.fraction_digits())
    }

    #[test]
    fn captures_shortest_digits() {
        assert_eq!(parts(1234.5), ("1234".into(), "5".into()));
        assert_eq!(parts(0.05), ("".into(), "05".into()));
        assert_eq!(parts(100.0), ("100".into(), "".into()));
        assert_eq!(parts(0.0), ("".into(), "".into()));
    }

    #[test]
    fn exponent_of_leading_digit() {
        assert_eq!(Decimal::from_f64(1234.0).exponent(), 3);
        assert_eq!(Decimal::from_f64(0.05).exponent(), -2);
        assert_eq!(Decimal::from_f64(7.0).exponent(), 0);
        assert_eq!(Decimal::zero().exponent(), 0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let mut d = Decimal::from_f64(2.675);
        d.round_fraction(2);
        assert_eq!(d.fraction_digits(), "68");

        let mut d = Decimal::from_f64(0.125);
        d.round_fraction(2);
        assert_eq!(d.fraction_digits(), "13");

        let mut d = Decimal::from_f64(2.5);
        d.round_fraction(0);
        assert_eq!(d.integral_digits(), "3");
    }

    #[test]
    fn rounding_carries_into_new_digit() {
        let mut d = Decimal::from_f64(9.96);
        d.round_fraction(1);
        assert_eq!(d.integral_digits(), "10");
        assert_eq!(d.fraction_digits(), "");
    }

    #[test]
    fn rounding_below_precision_gives_zero() {
        let mut d = Decimal::from_f64(0.004);
        d.round_fraction(2);
        assert!(d.is_zero());

        let mut d = Decimal::from_f64(0.005);
        d.round_fraction(2);
        assert_eq!(d.fraction_digits(), "01");

        let mut d = Decimal::from_f64(0.0004);
        d.round_fraction(1);
        assert!(d.is_zero());
    }

    #[test]
    fn significant_rounding() {
        let mut d = Decimal::from_f64(123456.0);
        d.round_significant(3);
        assert_eq!(d.integral_digits(), "123000");
        assert_eq!(d.significant_digits(4), "1230");
    }

    #[test]
    fn shift_scales_by_powers_of_ten() {
        let mut d = Decimal::from_f64(0.25);
        d.shift(2);
        assert_eq!(d.integral_digits(), "25");
        d.shift(-3);
        assert_eq!(d.fraction_digits(), "025");
    }
}
