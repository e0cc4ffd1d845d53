use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// BRL amount in centavos, rounded half away from zero. `None` if it does
/// not fit in an `i64`.
pub fn amount_in_cents(amount: Decimal) -> Option<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(amount_in_cents(dec!(150)), Some(15000));
        assert_eq!(amount_in_cents(dec!(99.90)), Some(9990));
        assert_eq!(amount_in_cents(dec!(0.01)), Some(1));
    }

    #[test]
    fn sub_cent_values_round_half_up() {
        assert_eq!(amount_in_cents(dec!(10.005)), Some(1001));
        assert_eq!(amount_in_cents(dec!(10.004)), Some(1000));
    }
}
