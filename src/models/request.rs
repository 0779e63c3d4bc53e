use serde::{Deserialize, Serialize};

use super::charge::ChargeRow;
use super::container::ContainerProfiles;
use super::nomination::NominationRecord;
use super::rates::ExchangeRateTable;
use super::results::Calculation;
use crate::config::DEFAULT_POL;

// ---------------------------------------------------------------------------
// CalculationRequest: everything one calculation reads
// ---------------------------------------------------------------------------

/// Immutable input of a single calculation.
///
/// Built fresh from the current form state for every request; the engine
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub charge_rows: Vec<ChargeRow>,
    pub nomination_records: Vec<NominationRecord>,
    pub containers: ContainerProfiles,
    pub rate_table: ExchangeRateTable,
}

impl CalculationRequest {
    pub fn new(containers: ContainerProfiles, rate_table: ExchangeRateTable) -> Self {
        Self {
            charge_rows: Vec::new(),
            nomination_records: Vec::new(),
            containers,
            rate_table,
        }
    }

    pub fn charge(mut self, row: ChargeRow) -> Self {
        self.charge_rows.push(row);
        self
    }

    pub fn nomination(mut self, record: NominationRecord) -> Self {
        self.nomination_records.push(record);
        self
    }

    pub fn nomination_for(&self, agent: &str) -> Option<&NominationRecord> {
        self.nomination_records.iter().find(|n| n.agent_name == agent)
    }
}

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "POL")]
    pub pol: String,
    #[serde(rename = "POD")]
    pub pod: String,
}

impl Route {
    /// Route from the default loading port.
    pub fn to(pod: &str) -> Self {
        Self {
            pol: DEFAULT_POL.to_string(),
            pod: pod.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SavedComparison: what gets persisted under a name
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedComparison {
    pub route: Route,
    pub request: CalculationRequest,
    pub calculation: Calculation,
}
