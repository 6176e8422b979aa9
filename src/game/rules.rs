//! Pure game rules
//!
//! Nothing here touches storage or randomness directly; callers roll the
//! dice and pass the results in.

use rand::Rng;

use crate::config::PaymentsConfig;
use crate::model::{Invoice, InvoicePrice, MatchResult, DAILY_PERIOD_SECS, MIN_SELL_PRICE};

/// Roll an integer from an inclusive `(min, max)` range. Reversed bounds
/// are tolerated.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, (a, b): (i64, i64)) -> i64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    rng.gen_range(lo..=hi)
}

/// Seconds left before the daily bonus can be claimed again, `None` if ready
pub fn daily_cooldown(last_daily: i64, now: i64) -> Option<i64> {
    let elapsed = now - last_daily;
    (elapsed < DAILY_PERIOD_SECS).then(|| DAILY_PERIOD_SECS - elapsed)
}

/// Strictly stronger wins; a draw goes to the opponent
pub fn resolve_match(your: i64, enemy: i64) -> MatchResult {
    if your > enemy {
        MatchResult::Win
    } else {
        MatchResult::Lose
    }
}

/// Validate a requested sale price and floor it to whole coins
pub fn listing_price(price: f64) -> Option<i64> {
    (price.is_finite() && price >= MIN_SELL_PRICE).then(|| price.floor() as i64)
}

/// Telegram invoice for `amount` coins. Prices are in the smallest currency
/// unit (cents for USD).
pub fn build_invoice(user_id: i64, amount: i64, provider_token: &str, payments: &PaymentsConfig) -> Invoice {
    let per_unit = payments.coins_per_unit.max(1);
    let cents = amount * 100 / per_unit;

    Invoice {
        chat_id: user_id,
        provider_token: provider_token.to_string(),
        start_parameter: format!("coins_{}", amount),
        title: format!("Buy {} coins", amount),
        description: format!("{} coins for Football Stars", amount),
        currency: payments.currency.clone(),
        prices: vec![InvoicePrice {
            label: format!("{} coins", amount),
            amount: cents,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let v = roll(&mut rng, (200, 500));
            assert!((200..=500).contains(&v));
        }
        assert_eq!(roll(&mut rng, (3, 3)), 3);
        assert!((1..=9).contains(&roll(&mut rng, (9, 1))));
    }

    #[test]
    fn test_daily_cooldown() {
        let now = 1_700_000_000;
        assert_eq!(daily_cooldown(now, now), Some(86_400));
        assert_eq!(daily_cooldown(now - 86_399, now), Some(1));
        assert_eq!(daily_cooldown(now - 86_400, now), None);
        assert_eq!(daily_cooldown(0, now), None);
    }

    #[test]
    fn test_draw_is_a_loss() {
        assert_eq!(resolve_match(201, 200), MatchResult::Win);
        assert_eq!(resolve_match(200, 200), MatchResult::Lose);
        assert_eq!(resolve_match(0, 150), MatchResult::Lose);
    }

    #[test]
    fn test_listing_price() {
        assert_eq!(listing_price(99.99), None);
        assert_eq!(listing_price(100.0), Some(100));
        assert_eq!(listing_price(250.9), Some(250));
        assert_eq!(listing_price(f64::NAN), None);
        assert_eq!(listing_price(f64::INFINITY), None);
    }

    #[test]
    fn test_invoice_prices_ten_coins_per_dollar() {
        let payments = PaymentsConfig::default();
        let invoice = build_invoice(42, 500, "123:TEST", &payments);

        assert_eq!(invoice.chat_id, 42);
        assert_eq!(invoice.currency, "USD");
        assert_eq!(invoice.start_parameter, "coins_500");
        assert_eq!(invoice.prices.len(), 1);
        assert_eq!(invoice.prices[0].amount, 5_000);
        assert_eq!(build_invoice(1, 100, "t", &payments).prices[0].amount, 1_000);
    }
}
