//! Console report adapter: fixed-width account summary and trade log.
//!
//! Rendering is split into pure string builders so tests can assert on the
//! output without capturing stdout.

use crate::domain::error::BandtraderError;
use crate::domain::ledger::Ledger;
use crate::ports::report_port::ReportPort;

pub struct ConsoleReportAdapter;

impl ReportPort for ConsoleReportAdapter {
    fn write(&self, ledger: &Ledger) -> Result<(), BandtraderError> {
        print!("{}", render_summary(ledger));
        print!("{}", render_trade_log(ledger));
        Ok(())
    }
}

pub fn render_summary(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str("Account summary:\n");
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "initial capital:",
        ledger.initial_capital()
    ));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "available capital:",
        ledger.available_capital()
    ));
    out.push_str(&format!("  {:<20} {:>12}\n", "position:", ledger.position()));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "last price:",
        ledger.last_price()
    ));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "average cost:",
        ledger.average_cost_price()
    ));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "market value:",
        ledger.market_value()
    ));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "account value:",
        ledger.account_value()
    ));
    out.push_str(&format!(
        "  {:<20} {:>12.2}\n",
        "total profit:",
        ledger.total_profit()
    ));
    out
}

pub fn render_trade_log(ledger: &Ledger) -> String {
    let mut out = String::new();
    out.push_str("\nTrade log:\n");

    let header = format!(
        "{:<9} {:<5} {:>10} {:>6} {:>8} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "time",
        "side",
        "price",
        "qty",
        "position",
        "cost",
        "market val",
        "capital",
        "account val",
        "profit",
    );
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for entry in ledger.trade_log() {
        out.push_str(&format!(
            "{:<9} {:<5} {:>10.2} {:>6} {:>8} {:>10.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}\n",
            entry.time.format("%H:%M:%S").to_string(),
            entry.side.to_string(),
            entry.price,
            entry.quantity,
            entry.position,
            entry.cost_price,
            entry.market_value,
            entry.available_capital,
            entry.account_value,
            entry.total_profit,
        ));
    }

    out
}
