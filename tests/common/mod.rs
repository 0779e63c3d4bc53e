//! Shared test fixtures for the lcl-charges integration tests.
//!
//! Provides `setup_data_dir()` which builds an `LclCalculator` over a
//! temporary data directory seeded with a small exchange-rate table and POD
//! list, plus helpers for the container profiles and agents used across
//! the engine tests.

#![allow(dead_code)]

use lcl_charges::models::{
    AgentTotals, ContainerProfile, ContainerProfiles, ContainerSize, ExchangeRateTable,
};
use lcl_charges::LclCalculator;
use std::fs;

pub const RATES_CSV: &str = "\
Currency,Exchange Rate to USD
USD,1
EUR,1.25
AED,0.25
GBP,1.5
";

pub const PODS_CSV: &str = "\
POD
Jebel Ali
Hamburg
Felixstowe
Hamburg
";

/// Create an `LclCalculator` backed by a temporary data directory with the
/// sample rate table and POD list written to it.
///
/// Returns `(LclCalculator, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn setup_data_dir() -> (LclCalculator, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_data_file(&tmp_dir, "exchange_rates.csv", RATES_CSV);
    write_data_file(&tmp_dir, "pod_locations.csv", PODS_CSV);

    let calc = LclCalculator::builder()
        .data_dir(tmp_dir.path())
        .build()
        .unwrap();
    (calc, tmp_dir)
}

/// A calculator over an empty temporary data directory.
pub fn setup_empty_data_dir() -> (LclCalculator, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let calc = LclCalculator::builder()
        .data_dir(tmp_dir.path())
        .build()
        .unwrap();
    (calc, tmp_dir)
}

pub fn write_data_file(dir: &tempfile::TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

/// USD, EUR 1.25, AED 0.25, GBP 1.5.
pub fn mixed_rates() -> ExchangeRateTable {
    ExchangeRateTable::new()
        .with_rate("USD", 1.0)
        .unwrap()
        .with_rate("EUR", 1.25)
        .unwrap()
        .with_rate("AED", 0.25)
        .unwrap()
        .with_rate("GBP", 1.5)
        .unwrap()
}

/// 20': 1000 USD box, 28 CBM, 5 BLs, market 40.
pub fn twenty_foot() -> ContainerProfile {
    ContainerProfile::new(ContainerSize::TwentyFoot, 1000.0, 28.0)
        .num_bl(5.0)
        .market_rate(40.0)
}

/// 40': 1740 USD box, 58 CBM, 9 BLs, market 38.
pub fn forty_foot() -> ContainerProfile {
    ContainerProfile::new(ContainerSize::FortyFoot, 1740.0, 58.0)
        .num_bl(9.0)
        .market_rate(38.0)
}

pub fn containers() -> ContainerProfiles {
    ContainerProfiles::new(twenty_foot(), forty_foot()).unwrap()
}

pub fn totals(agent: &str, per_cbm: f64, per_ton: f64, per_bl: f64) -> AgentTotals {
    let mut t = AgentTotals::zero(agent);
    t.total_per_cbm = per_cbm;
    t.total_per_ton = per_ton;
    t.total_per_bl = per_bl;
    t
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} but got {}",
        expected,
        actual
    );
}
