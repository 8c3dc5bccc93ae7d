use ethlab_units::{format_units, parse_units, BaseAmount, Unit, UnitsError, MAX_DECIMALS};
use num_bigint::BigUint;
use proptest::prelude::*;

// Up to 48 bytes, so values run well past U256.
fn any_amount() -> impl Strategy<Value = BaseAmount> {
    proptest::collection::vec(any::<u8>(), 0..48)
        .prop_map(|bytes| BaseAmount::new(BigUint::from_bytes_be(&bytes)))
}

fn any_unit() -> impl Strategy<Value = Unit> {
    (0..=MAX_DECIMALS).prop_map(|d| Unit::new(i64::from(d)).unwrap())
}

proptest! {
    #[test]
    fn parse_inverts_format(amount in any_amount(), unit in any_unit()) {
        let text = unit.format(&amount);
        prop_assert_eq!(unit.parse(&text).unwrap(), amount);
    }

    #[test]
    fn fraction_width_is_fixed(amount in any_amount(), unit in any_unit()) {
        let text = unit.format(&amount);
        match text.split_once('.') {
            Some((whole, fraction)) => {
                prop_assert_eq!(fraction.len(), usize::from(unit.decimals()));
                prop_assert!(!whole.is_empty());
            }
            None => {
                prop_assert_eq!(unit.decimals(), 0);
            }
        }
    }

    #[test]
    fn format_preserves_order(a in any_amount(), b in any_amount(), unit in any_unit()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_back = unit.parse(&unit.format(&low)).unwrap();
        let high_back = unit.parse(&unit.format(&high)).unwrap();
        prop_assert!(low_back <= high_back);
        prop_assert_eq!(low < high, low_back < high_back);
    }

    #[test]
    fn parse_scales_whole_numbers(whole in any::<u64>(), d in 0u8..=30) {
        let parsed = parse_units(&whole.to_string(), d).unwrap();
        prop_assert_eq!(parsed, BaseAmount::from(whole) * BaseAmount::pow10(u32::from(d)));
    }

    #[test]
    fn excess_precision_is_always_rejected(d in 0u8..=20, extra in 1usize..5) {
        let text = format!("1.{}", "1".repeat(usize::from(d) + extra));
        prop_assert_eq!(
            parse_units(&text, d),
            Err(UnitsError::TooManyDecimals { found: usize::from(d) + extra, max: d })
        );
    }
}

#[test]
fn token_supply_scale_is_exact() {
    // 10 billion tokens at 18 decimals
    let supply = parse_units("10000000000", "ether").unwrap();
    assert_eq!(supply, BaseAmount::pow10(28));
    assert_eq!(format_units(&supply, 18).unwrap(), "10000000000.000000000000000000");
}
