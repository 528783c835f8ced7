use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::EngineError;

/// Largest accepted amount in major units. Keeps `major * 100` exact in `f64`.
const MAX_MAJOR: f64 = 1e13;
const MAX_CENTS: u64 = 1_000_000_000_000_000;

/// Non-negative price represented as **integer cents**.
///
/// Use this type for **all** monetary values (list price, actual price, unit
/// cost and the aggregated totals) to avoid floating-point drift when
/// summing.
///
/// On the wire a price is a plain JSON number of major units (`12.5`), the
/// shape the persisted blob and the AI collaborator both use.
///
/// # Examples
///
/// ```rust
/// use engine::Price;
///
/// let price = Price::new(12_34);
/// assert_eq!(price.cents(), 1234);
/// assert_eq!(price.to_string(), "¥12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator, an
/// optional `¥` prefix or `元` suffix; rejects negative amounts and more than
/// 2 decimals):
///
/// ```rust
/// use engine::Price;
///
/// assert_eq!("10".parse::<Price>().unwrap().cents(), 1000);
/// assert_eq!("¥10,5".parse::<Price>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Price>().is_err());
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);
    /// Largest price that survives a trip through the stored JSON.
    pub const MAX: Price = Price(MAX_CENTS);

    /// Creates a new price from integer cents.
    #[must_use]
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    /// Creates a price from integer cents, rejecting amounts above [`Price::MAX`].
    pub fn checked_new(cents: u64) -> Result<Self, EngineError> {
        if cents > MAX_CENTS {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(cents))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Returns `true` if the price is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the price is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Price in major units, for ratios and wire output.
    #[must_use]
    pub fn major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Builds a price from major units, rounding to the nearest cent.
    ///
    /// Rejects negative, non-finite and absurdly large values.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount("not a number".to_string()));
        }
        if value < 0.0 {
            return Err(EngineError::InvalidAmount(
                "price must be >= 0".to_string(),
            ));
        }
        if value > MAX_MAJOR {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Self::checked_new((value * 100.0).round() as u64)
    }

    /// Difference floored at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Price) -> Price {
        Price(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yuan = self.0 / 100;
        let fen = self.0 % 100;
        write!(f, "¥{yuan}.{fen:02}")
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Price> for u64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Self::Output {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl FromStr for Price {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - no sign other than an optional leading `+`
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix('¥')
            .or_else(|| trimmed.strip_prefix('￥'))
            .unwrap_or(trimmed);
        let trimmed = trimmed.strip_suffix('元').unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return Err(empty());
        }
        if trimmed.starts_with('-') {
            return Err(EngineError::InvalidAmount(
                "price must be >= 0".to_string(),
            ));
        }
        let rest = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let yuan_str = parts.next().ok_or_else(invalid)?;
        let fen_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if yuan_str.is_empty() || !yuan_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let yuan: u64 = yuan_str.parse().map_err(|_| overflow())?;

        let fen: u64 = match fen_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<u64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = yuan
            .checked_mul(100)
            .and_then(|v| v.checked_add(fen))
            .ok_or_else(overflow)?;

        Price::checked_new(total)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.major())
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::from_major(value).map_err(de::Error::custom)
    }
}
