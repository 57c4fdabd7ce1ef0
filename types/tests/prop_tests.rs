use proptest::prelude::*;

use splitcalc_types::{Balance, Bps, BASE_UNITS_PER_TOKEN};

proptest! {
    /// Display -> parse gives back the same balance.
    #[test]
    fn balance_display_parse_identity(raw in any::<u64>()) {
        let b = Balance::new(raw);
        prop_assert_eq!(Balance::parse(&b.to_string()).unwrap(), b);
    }

    /// Human rendering always carries exactly eight fraction digits and
    /// reassembles into the original base-unit count.
    #[test]
    fn human_rendering_is_exact(raw in any::<u64>()) {
        let human = Balance::new(raw).human();
        let (whole, frac) = human.split_once('.').unwrap();
        prop_assert_eq!(frac.len(), 8);
        let whole: u64 = whole.parse().unwrap();
        let frac: u64 = frac.parse().unwrap();
        prop_assert_eq!(whole * BASE_UNITS_PER_TOKEN + frac, raw);
    }

    /// Lenient parse never fails and agrees with strict parse on valid input.
    #[test]
    fn lenient_parse_matches_strict_when_valid(s in "\\PC{0,24}") {
        let lenient = Balance::parse_lenient(&s);
        match Balance::parse(&s) {
            Ok(strict) => prop_assert_eq!(lenient, strict),
            Err(_) => prop_assert_eq!(lenient, Balance::ZERO),
        }
    }

    /// Bps::new accepts exactly [0, 10000].
    #[test]
    fn bps_range(v in 0u32..20_000) {
        prop_assert_eq!(Bps::new(v).is_ok(), v <= 10_000);
    }
}
