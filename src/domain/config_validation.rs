//! Configuration validation, run before the backtest starts.

use rust_decimal::Decimal;

use crate::domain::error::BandtraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    validate_symbol(config)?;
    validate_initial_capital(config)?;
    validate_buy_quantity(config)?;
    validate_window(config)?;
    validate_num_std(config)?;
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    match config.get_string("backtest", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BandtraderError::ConfigMissing {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
        }),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    // missing is fine (the default applies); present must be a positive decimal
    let Some(raw) = config.get_string("backtest", "initial_capital") else {
        return Ok(());
    };
    match raw.parse::<Decimal>() {
        Ok(value) if value > Decimal::ZERO => Ok(()),
        Ok(_) => Err(BandtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        }),
        Err(_) => Err(BandtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_capital".to_string(),
            reason: format!("not a decimal amount: {raw}"),
        }),
    }
}

fn validate_buy_quantity(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    let value = config.get_int("backtest", "buy_quantity", 10);
    if value <= 0 {
        return Err(BandtraderError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "buy_quantity".to_string(),
            reason: "buy_quantity must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    let value = config.get_int("bollinger", "window", 15);
    if value < 2 {
        return Err(BandtraderError::ConfigInvalid {
            section: "bollinger".to_string(),
            key: "window".to_string(),
            reason: "window must be at least 2".to_string(),
        });
    }
    Ok(())
}

fn validate_num_std(config: &dyn ConfigPort) -> Result<(), BandtraderError> {
    let value = config.get_double("bollinger", "num_std", 2.0);
    if value <= 0.0 {
        return Err(BandtraderError::ConfigInvalid {
            section: "bollinger".to_string(),
            key: "num_std".to_string(),
            reason: "num_std must be positive".to_string(),
        });
    }
    Ok(())
}
