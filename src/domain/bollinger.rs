//! Bollinger band computation.
//!
//! - Middle: simple moving average over `window` samples
//! - Upper: middle + multiplier × stddev
//! - Lower: middle − multiplier × stddev
//!
//! Stddev is the sample standard deviation (divides by n−1). The first
//! `window − 1` points are marked invalid; the driver skips them before
//! placing any order.

/// Band values at one sample index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    pub valid: bool,
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BandPoint {
    const INVALID: BandPoint = BandPoint {
        valid: false,
        middle: 0.0,
        upper: 0.0,
        lower: 0.0,
    };
}

/// Compute one band point per input price. Pure function of the price
/// slice; independent of any ledger state.
pub fn compute_bands(prices: &[f64], window: usize, num_std: f64) -> Vec<BandPoint> {
    let mut points = Vec::with_capacity(prices.len());
    let warmup = window.saturating_sub(1);

    for i in 0..prices.len() {
        if i < warmup || window < 2 {
            points.push(BandPoint::INVALID);
            continue;
        }

        let slice = &prices[i + 1 - window..=i];
        let middle: f64 = slice.iter().sum::<f64>() / window as f64;

        let variance: f64 = slice
            .iter()
            .map(|p| {
                let diff = p - middle;
                diff * diff
            })
            .sum::<f64>()
            / (window - 1) as f64;
        let stddev = variance.sqrt();

        points.push(BandPoint {
            valid: true,
            middle,
            upper: middle + num_std * stddev,
            lower: middle - num_std * stddev,
        });
    }

    points
}
