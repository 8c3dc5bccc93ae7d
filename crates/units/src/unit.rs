use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::amount::BaseAmount;
use crate::convert;
use crate::error::UnitsError;

/// Largest digit count a unit may have.
pub const MAX_DECIMALS: u8 = 80;

static UNIT_ALIASES: Lazy<HashMap<&'static str, Unit>> = Lazy::new(|| {
    HashMap::from([
        ("wei", Unit::WEI),
        ("kwei", Unit::KWEI),
        ("mwei", Unit::MWEI),
        ("gwei", Unit::GWEI),
        ("szabo", Unit::SZABO),
        ("finney", Unit::FINNEY),
        ("ether", Unit::ETHER),
    ])
});

/// A resolved conversion scale: one unit is `10^decimals` base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unit(u8);

impl Unit {
    pub const WEI: Self = Self(0);
    pub const KWEI: Self = Self(3);
    pub const MWEI: Self = Self(6);
    pub const GWEI: Self = Self(9);
    pub const SZABO: Self = Self(12);
    pub const FINNEY: Self = Self(15);
    pub const ETHER: Self = Self(18);

    /// Validates a raw digit count.
    ///
    /// # Errors
    ///
    /// [`UnitsError::InvalidUnit`] when `decimals` is negative or above [`MAX_DECIMALS`].
    pub fn new(decimals: i64) -> Result<Self, UnitsError> {
        if !(0..=i64::from(MAX_DECIMALS)).contains(&decimals) {
            return Err(UnitsError::InvalidUnit(format!(
                "decimals must be 0..={MAX_DECIMALS}, got {decimals}"
            )));
        }
        Ok(Self(decimals as u8))
    }

    /// Looks up one of `wei`, `kwei`, `mwei`, `gwei`, `szabo`, `finney`, `ether`.
    pub fn from_alias(alias: &str) -> Result<Self, UnitsError> {
        UNIT_ALIASES
            .get(alias)
            .copied()
            .ok_or_else(|| UnitsError::InvalidUnit(format!("unknown unit alias {alias:?}")))
    }

    pub const fn decimals(self) -> u8 {
        self.0
    }

    /// The alias naming this scale, if it has one.
    pub fn alias(self) -> Option<&'static str> {
        UNIT_ALIASES
            .iter()
            .find(|(_, unit)| **unit == self)
            .map(|(name, _)| *name)
    }

    pub fn scale(self) -> BaseAmount {
        BaseAmount::pow10(u32::from(self.0))
    }

    pub fn format(self, amount: &BaseAmount) -> String {
        convert::format_scaled(amount, self.0)
    }

    pub fn parse(self, text: &str) -> Result<BaseAmount, UnitsError> {
        convert::parse_scaled(text, self.0)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::ETHER
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alias() {
            Some(name) => f.write_str(name),
            None => write!(f, "{} decimals", self.0),
        }
    }
}

impl FromStr for Unit {
    type Err = UnitsError;

    /// Aliases only. Digit counts go through `Unit::new`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s)
    }
}

/// An unresolved unit argument, as a caller supplies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitSpec {
    Decimals(i64),
    Alias(String),
    Unit(Unit),
}

impl UnitSpec {
    pub fn resolve(&self) -> Result<Unit, UnitsError> {
        match self {
            Self::Decimals(decimals) => Unit::new(*decimals),
            Self::Alias(alias) => Unit::from_alias(alias),
            Self::Unit(unit) => Ok(*unit),
        }
    }
}

impl From<Unit> for UnitSpec {
    fn from(unit: Unit) -> Self {
        Self::Unit(unit)
    }
}

impl From<&str> for UnitSpec {
    fn from(alias: &str) -> Self {
        Self::Alias(alias.to_string())
    }
}

impl From<String> for UnitSpec {
    fn from(alias: String) -> Self {
        Self::Alias(alias)
    }
}

macro_rules! unit_spec_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for UnitSpec {
                fn from(decimals: $int) -> Self {
                    Self::Decimals(i64::from(decimals))
                }
            }
        )*
    };
}

unit_spec_from_int!(u8, u16, u32, i8, i16, i32, i64);
