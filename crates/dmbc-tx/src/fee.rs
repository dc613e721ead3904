//! Third-party fee schedules attached to issued assets.
//!
//! Each asset carries three fee tiers (trade, exchange, transfer). A tier is
//! a fixed amount plus a proportional [`Fraction`] of the value moved.

use dmbc_types::Fraction;
use serde::{Deserialize, Serialize};

use crate::TxError;

/// Fee for one kind of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fee {
    pub fixed: u64,
    pub fraction: Fraction,
}

impl Fee {
    pub fn new(fixed: u64, fraction: Fraction) -> Self {
        Self { fixed, fraction }
    }

    /// Parse the fractional part from text, e.g. `Fee::parse(10, "0.1")`.
    pub fn parse(fixed: u64, fraction: &str) -> Result<Self, TxError> {
        Ok(Self::new(fixed, fraction.parse()?))
    }

    /// Fee owed on an operation moving `value` units: the fixed part plus
    /// `floor(value * fraction)`, saturating at `u64::MAX`.
    pub fn amount(&self, value: u64) -> u64 {
        self.fixed.saturating_add(self.fraction.apply(value))
    }
}

/// Trade, exchange, and transfer fees for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fees {
    pub trade: Fee,
    pub exchange: Fee,
    pub transfer: Fee,
}

impl Fees {
    pub fn new(trade: Fee, exchange: Fee, transfer: Fee) -> Self {
        Self {
            trade,
            exchange,
            transfer,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a schedule from three `(fixed, fraction text)` pairs.
    pub fn parse(
        trade_fixed: u64,
        trade_fraction: &str,
        exchange_fixed: u64,
        exchange_fraction: &str,
        transfer_fixed: u64,
        transfer_fraction: &str,
    ) -> Result<Self, TxError> {
        Ok(Self::new(
            Fee::parse(trade_fixed, trade_fraction)?,
            Fee::parse(exchange_fixed, exchange_fraction)?,
            Fee::parse(transfer_fixed, transfer_fraction)?,
        ))
    }
}

/// Fluent construction of [`Fees`]. Tiers that are never set stay zero.
#[derive(Debug, Default)]
pub struct FeesBuilder {
    fees: Fees,
}

impl FeesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trade(mut self, fixed: u64, fraction: Fraction) -> Self {
        self.fees.trade = Fee::new(fixed, fraction);
        self
    }

    pub fn exchange(mut self, fixed: u64, fraction: Fraction) -> Self {
        self.fees.exchange = Fee::new(fixed, fraction);
        self
    }

    pub fn transfer(mut self, fixed: u64, fraction: Fraction) -> Self {
        self.fees.transfer = Fee::new(fixed, fraction);
        self
    }

    pub fn build(self) -> Fees {
        self.fees
    }
}
