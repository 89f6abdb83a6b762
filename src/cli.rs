//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_config;
use crate::domain::driver::{self, DriverConfig};
use crate::domain::error::BandtraderError;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "bandtrader", about = "Bollinger band intraday backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an intraday backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Directory holding <SYMBOL>.csv intraday files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            data_dir,
        } => run_backtest(&config, symbol.as_deref(), data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BandtraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Assemble the driver configuration, applying the original strategy's
/// defaults: 10k capital, 10-share clips, 15-sample window, 2 stddev.
pub fn build_driver_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<DriverConfig, BandtraderError> {
    let symbol = match symbol_override {
        Some(s) => s.to_string(),
        None => adapter.get_string("backtest", "symbol").ok_or_else(|| {
            BandtraderError::ConfigMissing {
                section: "backtest".into(),
                key: "symbol".into(),
            }
        })?,
    };

    Ok(DriverConfig {
        symbol,
        window: adapter.get_int("bollinger", "window", 15) as usize,
        num_std: adapter.get_double("bollinger", "num_std", 2.0),
        buy_quantity: adapter.get_int("backtest", "buy_quantity", 10) as u32,
        initial_capital: adapter.get_decimal("backtest", "initial_capital", Decimal::from(10_000)),
    })
}

fn run_backtest(
    config_path: &std::path::Path,
    symbol_override: Option<&str>,
    data_dir_override: Option<&std::path::Path>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let driver_config = match build_driver_config(&adapter, symbol_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_dir = match data_dir_override {
        Some(d) => d.to_path_buf(),
        None => adapter
            .get_string("data", "path")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data")),
    };

    let data_port = CsvAdapter::new(data_dir);
    let ticks = match data_port.fetch_intraday(&driver_config.symbol) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running backtest: {} over {} samples (window {}, {} stddev)",
        driver_config.symbol,
        ticks.len(),
        driver_config.window,
        driver_config.num_std,
    );

    let ledger = match driver::run_backtest(&ticks, &driver_config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Executed {} trades, final position {}",
        ledger.trade_log().len(),
        ledger.position(),
    );

    let report = ConsoleReportAdapter;
    match report.write(&ledger) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &std::path::Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match validate_config(&adapter) {
        Ok(()) => {
            eprintln!("Configuration is valid");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn build_driver_config_with_defaults() {
        let config = adapter("[backtest]\nsymbol = BABA.US\n");
        let driver = build_driver_config(&config, None).unwrap();

        assert_eq!(driver.symbol, "BABA.US");
        assert_eq!(driver.window, 15);
        assert_eq!(driver.num_std, 2.0);
        assert_eq!(driver.buy_quantity, 10);
        assert_eq!(driver.initial_capital, dec!(10000));
    }

    #[test]
    fn build_driver_config_reads_all_sections() {
        let config = adapter(
            "[backtest]\nsymbol = MSFT.US\ninitial_capital = 25000.50\nbuy_quantity = 5\n\
             \n[bollinger]\nwindow = 20\nnum_std = 1.5\n",
        );
        let driver = build_driver_config(&config, None).unwrap();

        assert_eq!(driver.symbol, "MSFT.US");
        assert_eq!(driver.window, 20);
        assert_eq!(driver.num_std, 1.5);
        assert_eq!(driver.buy_quantity, 5);
        assert_eq!(driver.initial_capital, dec!(25000.50));
    }

    #[test]
    fn symbol_override_wins() {
        let config = adapter("[backtest]\nsymbol = BABA.US\n");
        let driver = build_driver_config(&config, Some("TSLA.US")).unwrap();
        assert_eq!(driver.symbol, "TSLA.US");
    }

    #[test]
    fn missing_symbol_is_an_error() {
        let config = adapter("[backtest]\nbuy_quantity = 10\n");
        assert!(matches!(
            build_driver_config(&config, None),
            Err(BandtraderError::ConfigMissing { .. })
        ));
    }
}
