//! Exact conversion between a token's smallest unit and its display units.
//!
//! ```
//! use ethlab_units::{format_ether, parse_ether, BaseAmount, Unit};
//!
//! let wei = parse_ether("0.001").unwrap();
//! assert_eq!(wei, BaseAmount::from(1_000_000_000_000_000u64));
//! assert_eq!(format_ether(&wei), "0.001000000000000000");
//! assert_eq!(Unit::GWEI.format(&BaseAmount::from(1_500_000_000u64)), "1.500000000");
//! ```

mod amount;
mod convert;
mod error;
mod unit;

pub use amount::BaseAmount;
pub use convert::{
    format_ether, format_gwei, format_units, format_units_trimmed, parse_ether, parse_gwei,
    parse_units,
};
pub use error::UnitsError;
pub use unit::{Unit, UnitSpec, MAX_DECIMALS};
