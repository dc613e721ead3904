//! Exact decimal fractions for proportional fees.
//!
//! A [`Fraction`] holds a value in `[0, 1]` as an integer count of
//! 10^-16 units, so `"0.99999"` is stored exactly and never passes through
//! binary floating point. The scale the value was written with is kept for
//! display; equality, ordering, hashing and the wire form only look at the
//! unit count, so `0.1 == 0.10`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::constants::{FRACTION_DIGITS, FRACTION_SCALE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FractionError {
    #[error("fraction must be a non-empty string")]
    Empty,

    #[error("invalid character '{0}' at position {1}")]
    InvalidCharacter(char, usize),

    #[error("more than one decimal point")]
    MultiplePoints,

    #[error("fraction has no digits")]
    NoDigits,

    #[error("too many fractional digits ({0}, max {max})", max = FRACTION_DIGITS)]
    TooManyDigits(usize),

    #[error("fraction is greater than 1")]
    OutOfRange,

    #[error("fraction units {0} exceed {max}", max = FRACTION_SCALE)]
    UnitsOutOfRange(u64),
}

/// Unsigned decimal fraction in `[0, 1]` with 16 digits of precision.
#[derive(Clone, Copy, Debug)]
pub struct Fraction {
    units: u64,
    scale: u8,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction { units: 0, scale: 0 };
    pub const ONE: Fraction = Fraction { units: FRACTION_SCALE, scale: 0 };

    /// Build a fraction from a raw unit count (10^-16 per unit).
    ///
    /// The display scale is the shortest one that renders the value exactly.
    pub fn from_units(units: u64) -> Result<Self, FractionError> {
        if units > FRACTION_SCALE {
            return Err(FractionError::UnitsOutOfRange(units));
        }
        let mut scale = FRACTION_DIGITS as u8;
        let mut rest = units % FRACTION_SCALE;
        if rest == 0 {
            scale = 0;
        } else {
            while rest % 10 == 0 {
                rest /= 10;
                scale -= 1;
            }
        }
        Ok(Fraction { units, scale })
    }

    /// Raw unit count, the value written on the wire.
    pub fn units(&self) -> u64 {
        self.units
    }

    /// Number of digits after the decimal point the value was written with.
    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.units == 0
    }

    /// `floor(amount * self)`, computed in 128-bit integers.
    pub fn apply(&self, amount: u64) -> u64 {
        if self.units == 0 || amount == 0 {
            return 0;
        }
        let product = amount as u128 * self.units as u128 / FRACTION_SCALE as u128;
        // self <= 1, so the product never exceeds `amount`.
        product as u64
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl Eq for Fraction {}

impl Hash for Fraction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.units.hash(state);
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.units.cmp(&other.units)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    fn from_str(s: &str) -> Result<Self, FractionError> {
        if s.is_empty() {
            return Err(FractionError::Empty);
        }

        let mut point = None;
        for (i, ch) in s.char_indices() {
            match ch {
                '0'..='9' => {}
                '.' if point.is_none() => point = Some(i),
                '.' => return Err(FractionError::MultiplePoints),
                _ => return Err(FractionError::InvalidCharacter(ch, i)),
            }
        }

        let (int_part, frac_part) = match point {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(FractionError::NoDigits);
        }
        if frac_part.len() > FRACTION_DIGITS {
            return Err(FractionError::TooManyDigits(frac_part.len()));
        }

        let whole = match int_part.trim_start_matches('0').as_bytes() {
            [] => 0u64,
            [b'1'] => 1,
            _ => return Err(FractionError::OutOfRange),
        };

        let mut fract = 0u64;
        for digit in frac_part.bytes() {
            fract = fract * 10 + (digit - b'0') as u64;
        }
        fract *= 10u64.pow((FRACTION_DIGITS - frac_part.len()) as u32);

        let units = whole * FRACTION_SCALE + fract;
        if units > FRACTION_SCALE {
            return Err(FractionError::OutOfRange);
        }

        Ok(Fraction {
            units,
            scale: frac_part.len() as u8,
        })
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.units / FRACTION_SCALE;
        if self.scale == 0 {
            return write!(f, "{}", whole);
        }
        let fract = self.units % FRACTION_SCALE;
        let digits = format!("{:0width$}", fract, width = FRACTION_DIGITS);
        write!(f, "{}.{}", whole, &digits[..self.scale as usize])
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct FractionVisitor;

impl<'de> Visitor<'de> for FractionVisitor {
    type Value = Fraction;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal fraction string such as \"0.25\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Fraction, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(FractionVisitor)
    }
}
