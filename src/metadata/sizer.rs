use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::warn;

use super::cache::MetadataCache;

/// Fractional digits kept after snapping to a step
pub const DEFAULT_PRECISION: u32 = 8;

/// Floor `value` to a multiple of `step`, then round to `precision` digits
///
/// A `step` of zero or less means the increment is unknown, so the value is
/// only rounded to `precision` digits (midpoint away from zero). Otherwise
/// the result is `floor(value / step) * step`, computed from the exact
/// remainder. Flooring never rounds a size up past what the caller asked
/// for; for negative values it moves toward negative infinity.
pub fn round_to_step(value: Decimal, step: Decimal, precision: u32) -> Decimal {
    if step <= Decimal::ZERO {
        return round_plain(value, precision);
    }

    // The remainder is exact; a rounded quotient can land on the next step
    let floored = value.checked_rem(step).and_then(|rem| {
        let truncated = value.checked_sub(rem)?;
        if rem < Decimal::ZERO {
            truncated.checked_sub(step)
        } else {
            Some(truncated)
        }
    });

    match floored {
        Some(floored) => round_plain(floored, precision),
        None => {
            warn!(%value, %step, "Step rounding overflowed, falling back to plain rounding");
            round_plain(value, precision)
        }
    }
}

fn round_plain(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Snaps prices and quantities to the increments the venue accepts
///
/// Lookups go through the shared [`MetadataCache`]; the first lookup on an
/// empty cache triggers its refresh. An unknown symbol or missing filter
/// yields `0`, meaning "no constraint known".
#[derive(Debug, Clone)]
pub struct OrderSizer {
    cache: Arc<MetadataCache>,
    precision: u32,
}

impl OrderSizer {
    pub fn new(cache: Arc<MetadataCache>) -> Self {
        Self {
            cache,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Override the number of fractional digits kept
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Tick size of the symbol's price filter, `0` if unknown
    pub async fn price_tick_size(&self, symbol: &str) -> Decimal {
        self.cache
            .get_symbol_rules(symbol, false)
            .await
            .and_then(|rules| rules.tick_size())
            .unwrap_or(Decimal::ZERO)
    }

    /// Step size of the symbol's lot-size filter, `0` if unknown
    pub async fn quantity_step_size(&self, symbol: &str) -> Decimal {
        self.cache
            .get_symbol_rules(symbol, false)
            .await
            .and_then(|rules| rules.step_size())
            .unwrap_or(Decimal::ZERO)
    }

    /// Minimum order notional, `0` if unknown
    pub async fn min_notional(&self, symbol: &str) -> Decimal {
        self.cache
            .get_symbol_rules(symbol, false)
            .await
            .and_then(|rules| rules.min_notional())
            .unwrap_or(Decimal::ZERO)
    }

    /// Floor a price to the symbol's tick size
    pub async fn adjust_price(&self, symbol: &str, price: Decimal) -> Decimal {
        let tick = self.price_tick_size(symbol).await;
        round_to_step(price, tick, self.precision)
    }

    /// Floor a quantity to the symbol's step size
    pub async fn adjust_quantity(&self, symbol: &str, quantity: Decimal) -> Decimal {
        let step = self.quantity_step_size(symbol).await;
        round_to_step(quantity, step, self.precision)
    }

    /// Check `price * quantity` against the symbol's minimum notional
    ///
    /// Returns `true` when no minimum is known.
    pub async fn meets_min_notional(&self, symbol: &str, price: Decimal, quantity: Decimal) -> bool {
        let minimum = self.min_notional(symbol).await;
        if minimum <= Decimal::ZERO {
            return true;
        }
        match price.checked_mul(quantity) {
            Some(notional) => notional >= minimum,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::MockExchangeAdapter;
    use crate::common::types::{ExchangeRuleSet, SymbolFilter, SymbolRules};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_step_floors_to_grid() {
        assert_eq!(round_to_step(dec!(27456.37), dec!(0.10), 8), dec!(27456.30));
        assert_eq!(round_to_step(dec!(0.0037), dec!(0.001), 8), dec!(0.003));
        assert_eq!(round_to_step(dec!(0.0037), dec!(0.001), DEFAULT_PRECISION), dec!(0.003));
        assert_eq!(round_to_step(dec!(12), dec!(5), 8), dec!(10));
        assert_eq!(round_to_step(dec!(0.0009), dec!(0.001), 8), dec!(0));
    }

    #[test]
    fn test_round_to_step_exact_multiple_unchanged() {
        assert_eq!(round_to_step(dec!(27456.30), dec!(0.10), 8), dec!(27456.30));
        assert_eq!(round_to_step(dec!(1.5), dec!(0.5), 8), dec!(1.5));
    }

    #[test]
    fn test_round_to_step_without_step_rounds_plainly() {
        assert_eq!(round_to_step(dec!(5.0), dec!(0.0), 8), dec!(5.0));
        assert_eq!(round_to_step(dec!(1.23456789123), Decimal::ZERO, 8), dec!(1.23456789));
        assert_eq!(round_to_step(dec!(2.345), dec!(-1), 2), dec!(2.35));
        assert_eq!(round_to_step(dec!(-2.345), Decimal::ZERO, 2), dec!(-2.35));
    }

    #[test]
    fn test_round_to_step_negative_value_floors_down() {
        assert_eq!(round_to_step(dec!(-1.05), dec!(0.1), 8), dec!(-1.1));
        assert_eq!(round_to_step(dec!(-0.0001), dec!(0.001), 8), dec!(-0.001));
    }

    #[test]
    fn test_round_to_step_extreme_values_do_not_panic() {
        let result = round_to_step(Decimal::MAX, dec!(0.0000000001), 2);
        assert_eq!(result, Decimal::MAX.round_dp(2));
        assert_eq!(round_to_step(Decimal::MIN, dec!(1), 8), Decimal::MIN);
    }

    #[test]
    fn test_round_to_step_full_precision_value_stays_below() {
        // value / step rounds up to exactly 1 at 28 digits
        let value = dec!(4.9999999999999999999999999999);
        assert_eq!(round_to_step(value, dec!(5), 8), Decimal::ZERO);
        assert_eq!(round_to_step(-value, dec!(5), 8), dec!(-5));

        let quantity = dec!(100) / dec!(27456.37);
        let rounded = round_to_step(quantity, dec!(0.001), 8);
        assert!(rounded <= quantity);
        assert_eq!(rounded, dec!(0.003));
    }

    fn decimal_value() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000i64..1_000_000_000i64, 0u32..=8).prop_map(|(m, s)| Decimal::new(m, s))
    }

    /// Values carrying up to 28 fractional digits, like `budget / price`
    fn full_precision_value() -> impl Strategy<Value = Decimal> {
        (-10i128.pow(20)..10i128.pow(20), 0u32..=28)
            .prop_map(|(m, s)| Decimal::from_i128_with_scale(m, s))
    }

    fn positive_step() -> impl Strategy<Value = Decimal> {
        (1i64..10_000i64, 0u32..=8).prop_map(|(m, s)| Decimal::new(m, s))
    }

    proptest! {
        #[test]
        fn prop_result_is_floor_multiple(value in decimal_value(), step in positive_step()) {
            let rounded = round_to_step(value, step, DEFAULT_PRECISION);
            prop_assert!(rounded <= value);
            prop_assert!(value - rounded < step);
            prop_assert_eq!((rounded / step).fract(), Decimal::ZERO);
        }

        #[test]
        fn prop_full_precision_result_never_exceeds_value(
            value in full_precision_value(),
            step in positive_step(),
        ) {
            let rounded = round_to_step(value, step, DEFAULT_PRECISION);
            prop_assert!(rounded <= value, "{} floored to {} with step {}", value, rounded, step);
            prop_assert!(value - rounded < step);
            prop_assert_eq!(rounded % step, Decimal::ZERO);
        }

        #[test]
        fn prop_idempotent(value in decimal_value(), step in positive_step()) {
            let once = round_to_step(value, step, DEFAULT_PRECISION);
            prop_assert_eq!(round_to_step(once, step, DEFAULT_PRECISION), once);
        }

        #[test]
        fn prop_non_positive_step_is_plain_rounding(value in decimal_value(), precision in 0u32..=8) {
            let expected = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
            prop_assert_eq!(round_to_step(value, Decimal::ZERO, precision), expected);
            prop_assert_eq!(round_to_step(value, dec!(-0.5), precision), expected);
        }
    }

    fn sizer() -> OrderSizer {
        let mut mock = MockExchangeAdapter::new();
        mock.expect_venue_name().return_const("mock");
        mock.expect_fetch_rule_set().times(1).returning(|| {
            Ok(ExchangeRuleSet::new(
                vec![
                    SymbolRules::new(
                        "BTCUSDT",
                        vec![
                            SymbolFilter::price(dec!(0.10)),
                            SymbolFilter::lot_size(dec!(0.001)),
                            SymbolFilter::MinNotional { notional: dec!(100) },
                        ],
                    ),
                    SymbolRules::new("NOFILTERUSDT", vec![SymbolFilter::Other]),
                ],
                0,
            ))
        });

        let cache = MetadataCache::new(Arc::new(mock), vec![], 20);
        OrderSizer::new(Arc::new(cache))
    }

    #[tokio::test]
    async fn test_tick_and_step_lookup() {
        let sizer = sizer();
        assert_eq!(sizer.price_tick_size("btcusdt").await, dec!(0.10));
        assert_eq!(sizer.quantity_step_size("BTCUSDT").await, dec!(0.001));
        assert_eq!(sizer.min_notional("BTCUSDT").await, dec!(100));
    }

    #[tokio::test]
    async fn test_unknown_symbol_or_filter_is_zero() {
        let sizer = sizer();
        assert_eq!(sizer.quantity_step_size("XYZUSDT").await, Decimal::ZERO);
        assert_eq!(sizer.price_tick_size("XYZUSDT").await, Decimal::ZERO);
        assert_eq!(sizer.price_tick_size("NOFILTERUSDT").await, Decimal::ZERO);
        assert_eq!(sizer.quantity_step_size("NOFILTERUSDT").await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_adjust_price_and_quantity() {
        let sizer = sizer();
        assert_eq!(sizer.adjust_price("BTCUSDT", dec!(27456.37)).await, dec!(27456.30));
        assert_eq!(sizer.adjust_quantity("BTCUSDT", dec!(0.0037)).await, dec!(0.003));
        assert_eq!(sizer.adjust_quantity("XYZUSDT", dec!(5.0)).await, dec!(5.0));
    }

    #[tokio::test]
    async fn test_min_notional_check() {
        let sizer = sizer().with_precision(4);
        assert!(sizer.meets_min_notional("BTCUSDT", dec!(27000), dec!(0.004)).await);
        assert!(!sizer.meets_min_notional("BTCUSDT", dec!(27000), dec!(0.003)).await);
        assert!(sizer.meets_min_notional("XYZUSDT", dec!(1), dec!(0.0001)).await);
    }
}
