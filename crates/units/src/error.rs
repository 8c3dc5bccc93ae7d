use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// Negative or out-of-range digit count, or an alias that is not in the table.
    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    /// Empty input, a stray character, or more than one decimal point.
    #[error("invalid number format: {0:?}")]
    InvalidNumberFormat(String),

    #[error("too many decimals: {found} fractional digits, unit allows {max}")]
    TooManyDecimals { found: usize, max: u8 },

    #[error("value does not fit in 256 bits")]
    Overflow,

    #[error("amount subtraction underflow")]
    Underflow,
}
