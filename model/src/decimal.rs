use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Div, Mul, Sub};
use core::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, Zero};

/// The number of fractional digits retained by the `/` operator. Use
/// [Decimal::div_truncated] when a different scale is required.
pub const DIVISION_SCALE: u32 = 64;

/// There was an error parsing a decimal from a string. Only plain
/// fixed-point notation i.e. `[-]digits[.digits]` is accepted.
#[derive(Debug, PartialEq)]
pub struct ParseDecimalError {}

/// An arbitrary precision decimal number represented as a big integer
/// mantissa scaled by a power of ten i.e. `mantissa / 10^scale`.
///
/// Addition, subtraction and multiplication are exact. Division truncates
/// toward zero at a given number of fractional digits.
#[derive(Clone, Debug)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

impl Decimal {
    /// Create a decimal with the value `mantissa / 10^scale`.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::from(1u8), 0)
    }

    /// The number of fractional digits carried.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.sign() == Sign::Minus
    }

    pub fn abs(&self) -> Self {
        Self::new(self.mantissa.abs(), self.scale)
    }

    // The mantissa expressed at a scale no smaller than our own.
    fn mantissa_at(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        if scale == self.scale {
            self.mantissa.clone()
        } else {
            &self.mantissa * pow10(scale - self.scale)
        }
    }

    /// Drop every fractional digit beyond `digits`. The value moves toward
    /// zero and is never rounded, so its magnitude can only decrease.
    pub fn truncate(&self, digits: u32) -> Self {
        if digits >= self.scale {
            self.clone()
        } else {
            Self::new(&self.mantissa / pow10(self.scale - digits), digits)
        }
    }

    /// Divide by `rhs`, keeping `scale` fractional digits and truncating
    /// toward zero.
    ///
    /// Panics if `rhs` is zero.
    pub fn div_truncated(&self, rhs: &Decimal, scale: u32) -> Self {
        // (a / 10^sa) / (b / 10^sb) * 10^scale = a * 10^(scale + sb) / (b * 10^sa)
        let numerator = &self.mantissa * pow10(scale + rhs.scale);
        let denominator = &rhs.mantissa * pow10(self.scale);
        Self::new(numerator / denominator, scale)
    }

    /// Remove trailing fractional zeros while keeping at least one
    /// fractional digit, so that `1` renders as `1.0`.
    pub fn trim_trailing_zeros(&self) -> Self {
        let ten = BigInt::from(10u8);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 1 && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        if scale == 0 {
            mantissa *= ten;
            scale = 1;
        }
        Self::new(mantissa, scale)
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<BigUint> for Decimal {
    fn from(value: BigUint) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.mantissa_at(scale).cmp(&other.mantissa_at(scale))
    }
}

impl<'a> Add<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'a Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.mantissa_at(scale) + rhs.mantissa_at(scale), scale)
    }
}

impl<'a> Sub<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'a Decimal) -> Decimal {
        let scale = self.scale.max(rhs.scale);
        Decimal::new(self.mantissa_at(scale) - rhs.mantissa_at(scale), scale)
    }
}

impl<'a> Mul<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'a Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

impl<'a> Div<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn div(self, rhs: &'a Decimal) -> Decimal {
        self.div_truncated(rhs, DIVISION_SCALE)
    }
}

macro_rules! forward_owned_binop {
    ($imp:ident, $method:ident) => {
        impl $imp<Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }

        impl<'a> $imp<&'a Decimal> for Decimal {
            type Output = Decimal;

            fn $method(self, rhs: &'a Decimal) -> Decimal {
                (&self).$method(rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);
forward_owned_binop!(Div, div);

impl fmt::Display for Decimal {
    /// Plain fixed-point notation with every carried fractional digit, no
    /// exponent and no digit grouping.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_str_radix(10);
        let scale = self.scale as usize;

        let mut padded = String::new();
        for _ in digits.len()..scale + 1 {
            padded.push('0');
        }
        padded.push_str(&digits);

        let (integer, fraction) = padded.split_at(padded.len() - scale);
        if self.is_negative() {
            f.write_str("-")?;
        }
        f.write_str(integer)?;
        if scale > 0 {
            f.write_str(".")?;
            f.write_str(fraction)?;
        }
        Ok(())
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
            return Err(ParseDecimalError {});
        }
        if unsigned.ends_with('.') {
            return Err(ParseDecimalError {});
        }

        let mut all_digits = String::from(integer);
        all_digits.push_str(fraction);
        let magnitude =
            BigInt::parse_bytes(all_digits.as_bytes(), 10).ok_or(ParseDecimalError {})?;
        let mantissa = if negative { -magnitude } else { magnitude };

        Ok(Self::new(mantissa, fraction.len() as u32))
    }
}
