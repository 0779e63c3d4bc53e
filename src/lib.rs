//! Destination-charge comparison for LCL ocean freight.
//!
//! Freight agents quote competing destination rate cards (per CBM, per ton,
//! per BL, rebates) in mixed currencies. This crate converts every card to
//! USD, prices each agent for shipments of 1 to 30 CBM, and works out the
//! profitability of nominated versus free-hand cargo in 20' and 40'
//! containers.
//!
//! The calculation itself is the pure function [`calculate`]. The
//! [`LclCalculator`] facade adds the data directory around it: exchange
//! rates and the POD list (CSV files queried through DuckDB) and saved
//! comparisons.
//!
//! # Quick start
//!
//! ```no_run
//! use lcl_charges::models::*;
//! use lcl_charges::LclCalculator;
//!
//! let calc = LclCalculator::builder().build().unwrap();
//! let rates = calc.rates().table().unwrap();
//!
//! let containers = ContainerProfiles::new(
//!     ContainerProfile::new(ContainerSize::TwentyFoot, 1000.0, 28.0).num_bl(5.0).market_rate(40.0),
//!     ContainerProfile::new(ContainerSize::FortyFoot, 1800.0, 58.0).num_bl(9.0).market_rate(38.0),
//! )
//! .unwrap();
//!
//! let request = CalculationRequest::new(containers, rates)
//!     .charge(ChargeRow::new("Agent 1", "THC", "EUR").per_cbm(12.0).per_bl(35.0))
//!     .nomination(NominationRecord::new("Agent 1", 30.0, 10.0, 2.0));
//!
//! let result = calc.calculate(&request).unwrap();
//! for warning in &result.warnings {
//!     println!("{}", warning);
//! }
//! ```

pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;
pub mod store;

pub use connection::Connection;
pub use engine::calculate;
pub use error::{LclError, Result};
pub use sql_builder::SqlBuilder;
pub use store::{DataStore, SaveOutcome};

use models::{Calculation, CalculationRequest, ExchangeRateTable, SavedComparison};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// LclCalculatorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`LclCalculator`].
#[derive(Default)]
pub struct LclCalculatorBuilder {
    data_dir: Option<PathBuf>,
}

impl LclCalculatorBuilder {
    /// Set a custom data directory.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/lcl-charges` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the calculator, creating the data directory if needed.
    ///
    /// Lookup tables are read lazily on first query.
    pub fn build(self) -> Result<LclCalculator> {
        let store = DataStore::new(self.data_dir)?;
        let conn = Connection::new(store)?;
        Ok(LclCalculator { conn })
    }
}

// ---------------------------------------------------------------------------
// LclCalculator
// ---------------------------------------------------------------------------

/// Entry point tying the calculation engine to a data directory.
pub struct LclCalculator {
    conn: Connection,
}

impl LclCalculator {
    pub fn builder() -> LclCalculatorBuilder {
        LclCalculatorBuilder::default()
    }

    /// Access the exchange-rate query interface.
    pub fn rates(&self) -> queries::RateQuery<'_> {
        queries::RateQuery::new(&self.conn)
    }

    /// Access the port-of-discharge query interface.
    pub fn ports(&self) -> queries::PortQuery<'_> {
        queries::PortQuery::new(&self.conn)
    }

    /// Access saved comparisons.
    pub fn store(&self) -> &DataStore {
        &self.conn.store
    }

    /// The current rate table, as a calculation would see it.
    pub fn rate_table(&self) -> Result<ExchangeRateTable> {
        self.rates().table()
    }

    /// Run a calculation. See [`calculate`].
    pub fn calculate(&self, request: &CalculationRequest) -> Result<Calculation> {
        calculate(request)
    }

    pub fn save(&self, name: &str, saved: &SavedComparison) -> Result<SaveOutcome> {
        self.conn.store.save(name, saved)
    }

    /// Drop the loaded lookup tables so the next query re-reads the CSV
    /// files. Call between calculations after editing them on disk.
    pub fn refresh(&self) {
        self.conn.reset_tables();
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for LclCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tables = self.conn.tables();
        tables.sort();
        write!(
            f,
            "LclCalculator(data_dir={}, tables=[{}])",
            self.conn.store.data_dir.display(),
            tables.join(", ")
        )
    }
}
