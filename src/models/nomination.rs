use serde::{Deserialize, Serialize};

use super::charge::amount;

// ---------------------------------------------------------------------------
// NominationRecord: pre-committed cargo for one agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominationRecord {
    #[serde(rename = "Agent Name")]
    pub agent_name: String,
    /// Contracted rate in USD per CBM.
    #[serde(rename = "Nomination Rate", default, deserialize_with = "amount::deserialize")]
    pub nomination_rate: f64,
    #[serde(rename = "Nomination CBM", default, deserialize_with = "amount::deserialize")]
    pub nomination_cbm: f64,
    #[serde(rename = "Nomination BL", default, deserialize_with = "amount::deserialize")]
    pub nomination_bl: f64,
}

impl NominationRecord {
    pub fn new(agent_name: &str, nomination_rate: f64, nomination_cbm: f64, nomination_bl: f64) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            nomination_rate,
            nomination_cbm,
            nomination_bl,
        }
    }

    /// A record with no nominated cargo.
    pub fn none(agent_name: &str) -> Self {
        Self::new(agent_name, 0.0, 0.0, 0.0)
    }
}
