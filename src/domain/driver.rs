//! Backtest driver: walks the intraday series and fires band-signal orders
//! against the ledger.

use rust_decimal::Decimal;

use super::bollinger::compute_bands;
use super::error::BandtraderError;
use super::ledger::Ledger;
use super::tick::Tick;

#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub symbol: String,
    pub window: usize,
    pub num_std: f64,
    pub buy_quantity: u32,
    pub initial_capital: Decimal,
}

pub const REASON_BELOW_LOWER: &str = "price below lower band";
pub const REASON_ABOVE_UPPER: &str = "price above upper band";

/// Run the Bollinger-band backtest over a time-ordered tick series.
///
/// Each step marks the ledger to market first, then trades: buy
/// `buy_quantity` when the price crosses under the lower band, sell the
/// entire position when it crosses over the upper band. Warm-up samples
/// (invalid band points) never trade. Rejected orders are skipped, which
/// reproduces the skip-if-can't-afford sizing policy.
pub fn run_backtest(ticks: &[Tick], config: &DriverConfig) -> Result<Ledger, BandtraderError> {
    let mut ledger = Ledger::new(config.initial_capital);

    let prices: Vec<f64> = ticks.iter().map(Tick::price_f64).collect();
    let bands = compute_bands(&prices, config.window, config.num_std);

    for (i, tick) in ticks.iter().enumerate().skip(1) {
        ledger.update_price(tick.price);

        let band = &bands[i];
        if !band.valid {
            continue;
        }

        let price = prices[i];
        if price < band.lower {
            ledger.buy(tick.time, tick.price, config.buy_quantity, REASON_BELOW_LOWER)?;
        }

        if price > band.upper && ledger.position() > 0 {
            ledger.sell(tick.time, tick.price, ledger.position(), REASON_ABOVE_UPPER)?;
        }
    }

    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::Side;
    use chrono::DateTime;
    use rust_decimal_macros::dec;

    fn make_ticks(prices: &[&str]) -> Vec<Tick> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| Tick {
                time: DateTime::from_timestamp(1_700_000_000 + 180 * i as i64, 0)
                    .unwrap()
                    .naive_utc(),
                price: p.parse().unwrap(),
                volume: 1000,
            })
            .collect()
    }

    fn config() -> DriverConfig {
        DriverConfig {
            symbol: "BABA.US".into(),
            window: 3,
            // the rolling window includes the current tick, so a tight
            // multiplier is needed for a 3-sample window to ever signal
            num_std: 1.0,
            buy_quantity: 10,
            initial_capital: dec!(10000),
        }
    }

    #[test]
    fn flat_series_never_trades() {
        let ticks = make_ticks(&["100", "100", "100", "100", "100", "100"]);
        let ledger = run_backtest(&ticks, &config()).unwrap();

        assert_eq!(ledger.position(), 0);
        assert!(ledger.trade_log().is_empty());
        assert_eq!(ledger.available_capital(), dec!(10000));
    }

    #[test]
    fn last_price_tracks_series_even_without_trades() {
        let ticks = make_ticks(&["100", "101", "102"]);
        let mut cfg = config();
        cfg.window = 10; // never warms up
        let ledger = run_backtest(&ticks, &cfg).unwrap();

        assert_eq!(ledger.last_price(), dec!(102));
        assert!(ledger.trade_log().is_empty());
    }

    #[test]
    fn drop_below_lower_band_buys() {
        // band at the last tick spans [101, 99, 90]: mean 96.67, sample
        // std 5.86, lower ~90.81, so the 90 tick crosses under it
        let ticks = make_ticks(&["100", "100", "101", "99", "90"]);
        let ledger = run_backtest(&ticks, &config()).unwrap();

        assert_eq!(ledger.position(), 10);
        assert_eq!(ledger.trade_log().len(), 1);
        let entry = &ledger.trade_log()[0];
        assert_eq!(entry.side, Side::Buy);
        assert_eq!(entry.price, dec!(90));
        assert_eq!(entry.reason, REASON_BELOW_LOWER);
    }

    #[test]
    fn spike_above_upper_band_exits_whole_position() {
        let ticks = make_ticks(&[
            "100", "100", "101", "99", "90", // buy at 90
            "91", "90", "120", // spike above upper band: sell all
        ]);
        let ledger = run_backtest(&ticks, &config()).unwrap();

        assert_eq!(ledger.position(), 0);
        let log = ledger.trade_log();
        let sells: Vec<_> = log.iter().filter(|e| e.side == Side::Sell).collect();
        assert_eq!(sells.len(), 1);
        assert_eq!(sells[0].quantity, 10);
        assert_eq!(sells[0].reason, REASON_ABOVE_UPPER);
        assert_eq!(sells[0].profit, dec!(300));
    }

    #[test]
    fn spike_without_position_does_not_sell() {
        let ticks = make_ticks(&["100", "100", "101", "99", "120"]);
        let ledger = run_backtest(&ticks, &config()).unwrap();

        assert_eq!(ledger.position(), 0);
        assert!(ledger.trade_log().is_empty());
    }

    #[test]
    fn unaffordable_signals_are_skipped() {
        let mut cfg = config();
        cfg.buy_quantity = 10_000;
        let ticks = make_ticks(&["100", "100", "101", "99", "90", "89", "88"]);
        let ledger = run_backtest(&ticks, &cfg).unwrap();

        assert_eq!(ledger.position(), 0);
        assert!(ledger.trade_log().is_empty());
        assert_eq!(ledger.available_capital(), dec!(10000));
    }

    #[test]
    fn repeated_dips_accumulate_lots() {
        let ticks = make_ticks(&["100", "100", "101", "99", "90", "80", "70"]);
        let ledger = run_backtest(&ticks, &config()).unwrap();

        assert!(ledger.position() >= 20, "multiple dip buys expected");
        assert_eq!(ledger.holdings().len() as u32, ledger.position() / 10);
    }

    #[test]
    fn empty_series_produces_flat_ledger() {
        let ledger = run_backtest(&[], &config()).unwrap();
        assert_eq!(ledger.position(), 0);
        assert_eq!(ledger.account_value(), dec!(10000));
    }
}
