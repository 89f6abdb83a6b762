//! Position/account ledger: share inventory, weighted-average cost, cash,
//! realized profit, and the append-only trade log.
//!
//! All money and cost-basis state is kept in `rust_decimal::Decimal` so the
//! weighted-average-cost invariant stays exact across many trades. Orders
//! that cannot be afforded (buy) or covered (sell) are rejected with an
//! explicit [`OrderOutcome::Rejected`] and leave the ledger untouched.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::error::BandtraderError;

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// One open purchase lot, consumed front-to-back on sell.
///
/// Lots are informational inventory only; cost basis comes from the
/// weighted average, never from lots.
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub time: NaiveDateTime,
    pub price: Decimal,
    pub quantity: u32,
}

/// An executed order. Immutable once appended; `profit` is zero for buys.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub time: NaiveDateTime,
    pub side: Side,
    pub price: Decimal,
    pub quantity: u32,
    pub reason: String,
    pub profit: Decimal,
}

/// Snapshot taken immediately after a trade is applied: the trade itself
/// plus the resulting ledger state.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeLogEntry {
    pub time: NaiveDateTime,
    pub side: Side,
    pub price: Decimal,
    pub quantity: u32,
    pub reason: String,
    pub profit: Decimal,
    pub position: u32,
    pub cost_price: Decimal,
    pub market_value: Decimal,
    pub available_capital: Decimal,
    pub account_value: Decimal,
    pub total_profit: Decimal,
}

/// Why an order was rejected. Rejections are policy, not errors: the
/// strategy driver skips unaffordable orders rather than aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InsufficientCapital {
        required: Decimal,
        available: Decimal,
    },
    InsufficientPosition {
        held: u32,
        requested: u32,
    },
}

/// Result of a well-formed order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderOutcome {
    Filled { profit: Decimal },
    Rejected(RejectReason),
}

impl OrderOutcome {
    /// Realized profit of the order; zero for buys and rejections.
    pub fn realized_profit(&self) -> Decimal {
        match self {
            OrderOutcome::Filled { profit } => *profit,
            OrderOutcome::Rejected(_) => Decimal::ZERO,
        }
    }
}

/// Single-symbol position and capital ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    position: u32,
    total_cost: Decimal,
    avg_cost_price: Decimal,
    last_price: Decimal,
    initial_capital: Decimal,
    available_capital: Decimal,
    holdings: Vec<Lot>,
    trade_history: Vec<Trade>,
    trade_log: Vec<TradeLogEntry>,
}

impl Ledger {
    pub fn new(initial_capital: Decimal) -> Self {
        Ledger {
            position: 0,
            total_cost: Decimal::ZERO,
            avg_cost_price: Decimal::ZERO,
            last_price: Decimal::ZERO,
            initial_capital,
            available_capital: initial_capital,
            holdings: Vec::new(),
            trade_history: Vec::new(),
            trade_log: Vec::new(),
        }
    }

    /// Mark-to-market without trading. No log entry is produced.
    pub fn update_price(&mut self, price: Decimal) {
        self.last_price = price;
    }

    /// Buy `quantity` shares at `price`.
    ///
    /// Returns `Rejected(InsufficientCapital)` without mutating anything
    /// when the cost exceeds available capital. Non-positive price or zero
    /// quantity is a programmer error and fails fast.
    pub fn buy(
        &mut self,
        time: NaiveDateTime,
        price: Decimal,
        quantity: u32,
        reason: &str,
    ) -> Result<OrderOutcome, BandtraderError> {
        if price <= Decimal::ZERO || quantity == 0 {
            return Err(BandtraderError::invalid_order(price, quantity));
        }

        let cost = price * Decimal::from(quantity);
        if cost > self.available_capital {
            return Ok(OrderOutcome::Rejected(RejectReason::InsufficientCapital {
                required: cost,
                available: self.available_capital,
            }));
        }

        self.total_cost += cost;
        self.position += quantity;
        self.last_price = price;
        self.available_capital -= cost;
        // position > 0 is guaranteed here
        self.avg_cost_price = self.total_cost / Decimal::from(self.position);

        self.holdings.push(Lot {
            time,
            price,
            quantity,
        });
        self.record(time, Side::Buy, price, quantity, reason, Decimal::ZERO);

        Ok(OrderOutcome::Filled {
            profit: Decimal::ZERO,
        })
    }

    /// Sell `quantity` shares at `price`, returning the realized profit
    /// computed against the pre-sale weighted average cost.
    ///
    /// Returns `Rejected(InsufficientPosition)` without mutating anything
    /// when `quantity` exceeds the held position. A sell that empties the
    /// position resets the average cost to the exit price and the cost
    /// basis to zero.
    pub fn sell(
        &mut self,
        time: NaiveDateTime,
        price: Decimal,
        quantity: u32,
        reason: &str,
    ) -> Result<OrderOutcome, BandtraderError> {
        if price <= Decimal::ZERO || quantity == 0 {
            return Err(BandtraderError::invalid_order(price, quantity));
        }

        if quantity > self.position {
            return Ok(OrderOutcome::Rejected(
                RejectReason::InsufficientPosition {
                    held: self.position,
                    requested: quantity,
                },
            ));
        }

        let proceeds = price * Decimal::from(quantity);
        let profit = (price - self.avg_cost_price) * Decimal::from(quantity);

        self.total_cost -= proceeds;
        self.position -= quantity;
        self.last_price = price;
        self.available_capital += proceeds;

        if self.position > 0 {
            self.avg_cost_price = self.total_cost / Decimal::from(self.position);
        } else {
            self.avg_cost_price = price;
            self.total_cost = Decimal::ZERO;
        }

        self.consume_lots(quantity);
        self.record(time, Side::Sell, price, quantity, reason, profit);

        Ok(OrderOutcome::Filled { profit })
    }

    /// Walk the open lots front-to-back, dropping fully consumed lots and
    /// truncating a partially consumed one in place.
    fn consume_lots(&mut self, quantity: u32) {
        let mut remaining = quantity;
        for lot in self.holdings.iter_mut() {
            if remaining == 0 {
                break;
            }
            if lot.quantity <= remaining {
                remaining -= lot.quantity;
                lot.quantity = 0;
            } else {
                lot.quantity -= remaining;
                remaining = 0;
            }
        }
        self.holdings.retain(|lot| lot.quantity > 0);
    }

    fn record(
        &mut self,
        time: NaiveDateTime,
        side: Side,
        price: Decimal,
        quantity: u32,
        reason: &str,
        profit: Decimal,
    ) {
        self.trade_history.push(Trade {
            time,
            side,
            price,
            quantity,
            reason: reason.to_string(),
            profit,
        });
        self.trade_log.push(TradeLogEntry {
            time,
            side,
            price,
            quantity,
            reason: reason.to_string(),
            profit,
            position: self.position,
            cost_price: self.avg_cost_price,
            market_value: price * Decimal::from(self.position),
            available_capital: self.available_capital,
            account_value: self.account_value(),
            total_profit: self.total_profit(),
        });
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn average_cost_price(&self) -> Decimal {
        self.avg_cost_price
    }

    pub fn last_price(&self) -> Decimal {
        self.last_price
    }

    pub fn initial_capital(&self) -> Decimal {
        self.initial_capital
    }

    pub fn available_capital(&self) -> Decimal {
        self.available_capital
    }

    /// `last_price * position`.
    pub fn market_value(&self) -> Decimal {
        self.last_price * Decimal::from(self.position)
    }

    /// Market value of holdings plus available capital.
    pub fn account_value(&self) -> Decimal {
        self.market_value() + self.available_capital
    }

    /// Account value minus initial capital.
    pub fn total_profit(&self) -> Decimal {
        self.account_value() - self.initial_capital
    }

    pub fn holdings(&self) -> &[Lot] {
        &self.holdings
    }

    pub fn trade_history(&self) -> &[Trade] {
        &self.trade_history
    }

    pub fn trade_log(&self) -> &[TradeLogEntry] {
        &self.trade_log
    }
}
