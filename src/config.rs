use std::collections::HashMap;
use std::path::PathBuf;

/// Currency every monetary figure is converted into.
pub const BASE_CURRENCY: &str = "USD";

/// Volume sweep runs over 1..=MAX_VOLUME_CBM.
pub const MAX_VOLUME_CBM: usize = 30;

/// Fixed weight/measure ratio: one ton of cargo is charged as 2 CBM.
pub const CBM_PER_TON: f64 = 2.0;

/// Only loading port the desk quotes from.
pub const DEFAULT_POL: &str = "Nhava Sheva";

/// Reserved charge-row descriptions.
pub const REMARKS_DESCRIPTION: &str = "Remarks";
pub const REBATE_DESCRIPTION: &str = "Rebate";

pub const TWENTY_FOOT_LABEL: &str = "20'STD";
pub const FORTY_FOOT_LABEL: &str = "40'STD";

pub const RATE_CURRENCY_COLUMN: &str = "Currency";
pub const RATE_VALUE_COLUMN: &str = "Exchange Rate to USD";
pub const POD_COLUMN: &str = "POD";

/// Sub-directory of the data directory holding saved comparisons.
pub const SAVED_DIR: &str = "saved";

pub fn data_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("exchange_rates", "exchange_rates.csv"),
        ("pod_locations", "pod_locations.csv"),
    ])
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("lcl-charges")
    } else {
        PathBuf::from(".lcl-charges-data")
    }
}
