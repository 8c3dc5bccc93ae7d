use std::fmt;
use std::ops::{Add, Div, Mul};
use std::str::FromStr;

use alloy_core::primitives::U256;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnitsError;

/// A non-negative quantity in a token's smallest unit (wei for ether).
///
/// Backed by an arbitrary-precision integer, so supplies well past `u64`
/// and even past `U256` are represented exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseAmount(BigUint);

impl BaseAmount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    /// `10^exponent`, the number of base units in one display unit.
    pub fn pow10(exponent: u32) -> Self {
        Self(BigUint::from(10u8).pow(exponent))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Parses plain base-10 digits. No sign, no separators, no decimal point.
    pub fn from_decimal_str(s: &str) -> Result<Self, UnitsError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UnitsError::InvalidNumberFormat(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| UnitsError::InvalidNumberFormat(s.to_string()))
    }

    /// Parses a `0x`-prefixed hex string.
    pub fn from_hex_str(s: &str) -> Result<Self, UnitsError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| UnitsError::InvalidNumberFormat(s.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(UnitsError::InvalidNumberFormat(s.to_string()));
        }
        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| UnitsError::InvalidNumberFormat(s.to_string()))
    }

    pub fn to_hex_string(&self) -> String {
        format!("{:#x}", self.0)
    }

    pub fn to_u256(&self) -> Result<U256, UnitsError> {
        U256::try_from_be_slice(&self.0.to_bytes_be()).ok_or(UnitsError::Overflow)
    }

    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        if self.0 < rhs.0 {
            return None;
        }
        Some(Self(&self.0 - &rhs.0))
    }

    pub fn try_sub(&self, rhs: &Self) -> Result<Self, UnitsError> {
        self.checked_sub(rhs).ok_or(UnitsError::Underflow)
    }

    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self(&self.0 / &rhs.0))
    }
}

impl FromStr for BaseAmount {
    type Err = UnitsError;

    /// Accepts decimal digits or a `0x` hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex_str(s)
        } else {
            Self::from_decimal_str(s)
        }
    }
}

impl fmt::Display for BaseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for BaseAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<BigUint> for BaseAmount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for BaseAmount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for BaseAmount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<U256> for BaseAmount {
    fn from(value: U256) -> Self {
        Self(BigUint::from_bytes_be(&value.to_be_bytes::<32>()))
    }
}

impl TryFrom<&BaseAmount> for U256 {
    type Error = UnitsError;

    fn try_from(value: &BaseAmount) -> Result<Self, Self::Error> {
        value.to_u256()
    }
}

impl TryFrom<BaseAmount> for U256 {
    type Error = UnitsError;

    fn try_from(value: BaseAmount) -> Result<Self, Self::Error> {
        value.to_u256()
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for BaseAmount {
            type Output = BaseAmount;

            fn $method(self, rhs: BaseAmount) -> BaseAmount {
                BaseAmount(self.0.$method(rhs.0))
            }
        }

        impl<'a> $trait<&'a BaseAmount> for &'a BaseAmount {
            type Output = BaseAmount;

            fn $method(self, rhs: &'a BaseAmount) -> BaseAmount {
                BaseAmount((&self.0).$method(&rhs.0))
            }
        }

        impl $trait<u64> for BaseAmount {
            type Output = BaseAmount;

            fn $method(self, rhs: u64) -> BaseAmount {
                BaseAmount(self.0.$method(BigUint::from(rhs)))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Mul, mul);
// Division by zero panics, like the primitive integers. Use `checked_div` for untrusted divisors.
forward_binop!(Div, div);

impl Serialize for BaseAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct BaseAmountVisitor;

impl<'de> Visitor<'de> for BaseAmountVisitor {
    type Value = BaseAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer as a decimal or 0x-hex string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BaseAmount, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BaseAmount, E> {
        Ok(BaseAmount::from(v))
    }
}

impl<'de> Deserialize<'de> for BaseAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BaseAmountVisitor)
    }
}
