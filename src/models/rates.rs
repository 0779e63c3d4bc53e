use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::BASE_CURRENCY;
use crate::error::{LclError, Result};

// ---------------------------------------------------------------------------
// ExchangeRateTable: currency code -> rate to the base currency
// ---------------------------------------------------------------------------

/// Lookup of currency code to its rate against the base currency (USD).
///
/// `USD` always resolves to `1.0`, even when the table itself has no entry
/// for it. Any other code that is absent resolves to `None`; callers must
/// treat that as unconvertible rather than substituting a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rate for `code`.
    ///
    /// Rates must be finite and strictly positive.
    pub fn insert(&mut self, code: &str, rate: f64) -> Result<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(LclError::InvalidArgument(
                "currency code cannot be empty".to_string(),
            ));
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(LclError::InvalidArgument(format!(
                "exchange rate for {} must be a positive number (got {})",
                code, rate
            )));
        }
        self.rates.insert(code.to_string(), rate);
        Ok(())
    }

    /// Chainable variant of [`insert`](Self::insert).
    pub fn with_rate(mut self, code: &str, rate: f64) -> Result<Self> {
        self.insert(code, rate)?;
        Ok(self)
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        let code = code.trim();
        match self.rates.get(code) {
            Some(rate) => Some(*rate),
            None if code == BASE_CURRENCY => Some(1.0),
            None => None,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Convert `amount` from `code` into the base currency.
    pub fn convert(&self, amount: f64, code: &str) -> Option<f64> {
        self.get(code).map(|rate| amount * rate)
    }

    /// Sorted list of the codes present in the table, plus USD.
    pub fn currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        if !self.rates.contains_key(BASE_CURRENCY) {
            codes.push(BASE_CURRENCY.to_string());
        }
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.rates.iter()
    }
}
