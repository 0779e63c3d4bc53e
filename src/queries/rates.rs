//! Exchange-rate queries backed by `exchange_rates.csv` loaded into DuckDB.

use serde_json::Value;

use crate::config::{BASE_CURRENCY, RATE_CURRENCY_COLUMN, RATE_VALUE_COLUMN};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::ExchangeRateTable;
use crate::sql_builder::{quote_ident, SqlBuilder};

const TABLE: &str = "exchange_rates";

// ---------------------------------------------------------------------------
// RateQuery
// ---------------------------------------------------------------------------

/// Query interface for the editable exchange-rate table.
pub struct RateQuery<'a> {
    conn: &'a Connection,
}

impl<'a> RateQuery<'a> {
    /// Create a new `RateQuery` bound to the given connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Build the rate table used by a calculation.
    ///
    /// Rows without a code or with a rate that is missing, non-numeric or
    /// not positive are skipped with a warning.
    pub fn table(&self) -> Result<ExchangeRateTable> {
        self.conn.ensure_tables(&[TABLE])?;

        let currency = quote_ident(RATE_CURRENCY_COLUMN);
        let rate = quote_ident(RATE_VALUE_COLUMN);
        let (sql, params) = SqlBuilder::new(TABLE).select(&[currency.as_str(), rate.as_str()]).build();

        let mut table = ExchangeRateTable::new();
        for row in self.conn.execute(&sql, &params)? {
            let code = row.get(RATE_CURRENCY_COLUMN).and_then(text_value);
            let value = row.get(RATE_VALUE_COLUMN).and_then(rate_value);
            match (code, value) {
                (Some(code), Some(value)) => {
                    if let Err(e) = table.insert(&code, value) {
                        tracing::warn!(currency = %code, error = %e, "skipping exchange rate");
                    }
                }
                (code, _) => {
                    tracing::warn!(currency = ?code, "skipping exchange rate row without a usable rate");
                }
            }
        }
        Ok(table)
    }

    /// Distinct currency codes in the table, sorted.
    pub fn currencies(&self) -> Result<Vec<String>> {
        self.conn.ensure_tables(&[TABLE])?;

        let currency = quote_ident(RATE_CURRENCY_COLUMN);
        let order = format!("{} ASC", currency);
        let (sql, params) = SqlBuilder::new(TABLE)
            .select(&[currency.as_str()])
            .distinct()
            .where_not_null(&currency)
            .order_by(&[order.as_str()])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .iter()
            .filter_map(|r| r.get(RATE_CURRENCY_COLUMN).and_then(text_value))
            .collect())
    }

    /// Rate to USD for a single currency; USD resolves even when absent.
    pub fn get(&self, code: &str) -> Result<Option<f64>> {
        self.conn.ensure_tables(&[TABLE])?;

        let currency = quote_ident(RATE_CURRENCY_COLUMN);
        let rate = quote_ident(RATE_VALUE_COLUMN);
        let (sql, params) = SqlBuilder::new(TABLE)
            .select(&[rate.as_str()])
            .where_eq(&currency, code.trim())
            .limit(1)
            .build();

        let found = self
            .conn
            .execute_scalar(&sql, &params)?
            .as_ref()
            .and_then(rate_value);
        Ok(found.or_else(|| (code.trim() == BASE_CURRENCY).then_some(1.0)))
    }

    /// Replace the stored table with `rates` and reload it.
    ///
    /// The CSV is rewritten atomically, sorted by currency code.
    pub fn replace_all(&self, rates: &ExchangeRateTable) -> Result<()> {
        let path = self.conn.store.data_file(TABLE)?;
        let currency = quote_ident(RATE_CURRENCY_COLUMN);
        let rate = quote_ident(RATE_VALUE_COLUMN);

        let raw = self.conn.raw();
        raw.execute_batch(&format!(
            "CREATE OR REPLACE TEMP TABLE exchange_rates_edit ({} VARCHAR, {} DOUBLE)",
            currency, rate
        ))?;

        let mut entries: Vec<(String, f64)> =
            rates.iter().map(|(code, value)| (code.clone(), *value)).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (code, value) in entries {
            raw.execute(
                "INSERT INTO exchange_rates_edit VALUES (?, ?)",
                duckdb::params![code, value],
            )?;
        }

        self.conn.copy_to_csv(
            &format!("SELECT * FROM exchange_rates_edit ORDER BY {}", currency),
            &path,
        )?;
        raw.execute_batch("DROP TABLE IF EXISTS exchange_rates_edit")?;
        self.conn.register_table_from_csv(TABLE, &path)?;

        tracing::info!(currencies = rates.len(), path = %path.display(), "exchange rates saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn rate_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
