use num_bigint::BigUint;

use crate::decimal::Decimal;

/// The number of fractional digits carried through the running product.
/// Comfortably more than the digits a report keeps so that truncation
/// error from up to ten thousand multiplications never reaches them.
pub const WORKING_SCALE: u32 = 64;

/// The size of the random value space for a given number of bits of
/// entropy i.e. `2^bitspace`, computed exactly.
pub fn entropy_space(bitspace: u32) -> Decimal {
    Decimal::from(BigUint::from(1u8) << bitspace)
}

/// The probability that at least one collision occurs when `n` groups of
/// identifiers each take `k` additional tie-break values from a space of
/// `d` random values:
///
/// ```text
/// p(n, k, d) = 1 - ∏_{i=1}^{n+1} (d - n·k - i) / d
/// ```
///
/// The model assumes `d - n·k` stays large relative to `n`. Inputs outside
/// of that are not rejected: a negative term is carried through the
/// product as is.
///
/// Panics if `d` is zero.
pub fn collision_probability(n: u64, k: u64, d: &Decimal) -> Decimal {
    let one = Decimal::one();

    let d_minus_n_times_k = d - &(Decimal::from(n) * Decimal::from(k));

    let mut product = one.clone();
    for i in 1..=n + 1 {
        let term = &(&d_minus_n_times_k - &Decimal::from(i)) / d;
        product = (&product * &term).truncate(WORKING_SCALE);
    }

    one - product
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_entropy_space() {
        assert_eq!(entropy_space(0), Decimal::one());
        assert_eq!(entropy_space(32), Decimal::from(4_294_967_296u64));
        assert_eq!(
            entropy_space(80).to_string(),
            "1208925819614629174706176"
        );
    }

    #[test]
    fn test_no_groups_leaves_one_term() {
        let d = entropy_space(22);
        let expected = &Decimal::one() - &(&d - &Decimal::one()).div_truncated(&d, WORKING_SCALE);
        assert_eq!(collision_probability(0, 7, &d), expected);
        assert_eq!(expected, Decimal::one().div_truncated(&d, WORKING_SCALE));
        assert!(!expected.is_zero());
    }

    #[test]
    fn test_small_space_by_hand() {
        // d = 10, n = 2, k = 1: m = 8, terms 7/10, 6/10, 5/10.
        let p = collision_probability(2, 1, &Decimal::from(10u64));
        assert_eq!(p, dec("0.79"));
    }

    #[test]
    fn test_negative_terms_are_not_clamped() {
        // d = 4, n = 3, k = 2: m = -2, terms -3/4, -4/4, -5/4, -6/4.
        let p = collision_probability(3, 2, &Decimal::from(4u64));
        assert_eq!(p, dec("-0.40625"));
    }

    #[test]
    fn test_birthday_paradox_without_tie_breaks() {
        // A year of days and 22 people is the textbook ~0.5 point, with
        // the product running over n + 1 terms.
        let p = collision_probability(21, 0, &Decimal::from(365u64));
        assert!(p > dec("0.5"));
        assert!(p < dec("0.6"));
    }

    #[test]
    fn test_32_bits_1000_observations_is_below_one() {
        let p = collision_probability(1000, 0, &entropy_space(32));
        assert!(p > Decimal::zero());
        assert!(p < Decimal::one());
        assert!(p.truncate(40).to_string().starts_with("0.000"));
    }

    #[test]
    fn test_80_bits_is_tiny() {
        let p = collision_probability(1000 / 29, 28, &entropy_space(80));
        assert!(p > Decimal::zero());
        assert!(p < dec("0.0000000001"));
    }

    #[test]
    fn test_22_bits_10000_observations_is_near_certain() {
        let p = collision_probability(10000, 0, &entropy_space(22));
        assert!(p > dec("0.9"));
        assert!(p < Decimal::one());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_non_decreasing_in_n(n in 0u64..200, k in 0u64..29, bits in prop::sample::select(vec![22u32, 32, 80])) {
            let d = entropy_space(bits);
            prop_assert!(collision_probability(n, k, &d) <= collision_probability(n + 1, k, &d));
        }

        #[test]
        fn test_within_unit_interval(n in 0u64..500, k in 0u64..29, bits in prop::sample::select(vec![22u32, 32, 80])) {
            let p = collision_probability(n, k, &entropy_space(bits));
            prop_assert!(p >= Decimal::zero());
            prop_assert!(p <= Decimal::one());
        }
    }
}
