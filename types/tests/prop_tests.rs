use proptest::prelude::*;

use paystream_types::{
    parse_amount, stream_duration, to_smallest_unit, Digest, Mist, SuiAddress, Timestamp,
    UnitError,
};

proptest! {
    /// Conversion is floor(amount × 10^9) for inputs with up to 9 fractional digits.
    #[test]
    fn smallest_unit_is_exact_floor(
        whole in 0u64..18_000_000_000,
        frac in 0u64..1_000_000_000,
        digits in 1usize..=9,
    ) {
        let frac_str = format!("{frac:09}");
        let frac_str = &frac_str[..digits];
        let input = format!("{whole}.{frac_str}");
        let frac_mist: u64 = format!("{frac_str:0<9}").parse().unwrap();
        let expected = whole * 1_000_000_000 + frac_mist;
        prop_assert_eq!(parse_amount(&input).unwrap(), Mist::new(expected));
    }

    /// Calling the converter twice on the same input yields the same value.
    #[test]
    fn conversion_is_idempotent(whole in 0u64..1_000_000, frac in 0u64..1_000_000_000) {
        let input = format!("{whole}.{frac:09}");
        prop_assert_eq!(parse_amount(&input), parse_amount(&input));
        prop_assert_eq!(to_smallest_unit(&input), to_smallest_unit(&input));
    }

    /// Digits past the ninth decimal never change the result.
    #[test]
    fn trailing_digits_truncate(whole in 0u64..1_000_000, frac in 0u64..1_000_000_000, tail in 0u32..10_000) {
        let base = format!("{whole}.{frac:09}");
        let longer = format!("{base}{tail}");
        prop_assert_eq!(parse_amount(&base).unwrap(), parse_amount(&longer).unwrap());
    }

    /// Duration is floor(balance / rate) and never exceeds the balance when rate ≥ 1.
    #[test]
    fn duration_is_floor_division(rate in 1u64..1_000_000_000, balance in 1u64..u64::MAX) {
        match stream_duration(Mist::new(rate), Mist::new(balance)) {
            Ok(d) => {
                prop_assert_eq!(d, balance / rate);
                prop_assert!(d <= balance);
                prop_assert!(d > 0);
            }
            Err(UnitError::RateExceedsBalance { .. }) => prop_assert!(rate > balance),
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }

    /// Text form of an address parses back to itself.
    #[test]
    fn address_text_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let addr = SuiAddress::new(bytes);
        let parsed: SuiAddress = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    /// Base58 text form of a digest parses back to itself.
    #[test]
    fn digest_text_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let d = Digest::new(bytes);
        let parsed: Digest = d.to_string().parse().unwrap();
        prop_assert_eq!(parsed, d);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }
}
