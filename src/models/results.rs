use serde::{Deserialize, Serialize};
use std::fmt;

use super::container::ContainerSize;

/// Serde helpers that read `null` back as NaN.
///
/// `serde_json` writes non-finite floats as `null`; an unconvertible total
/// has to survive a save/load round trip as NaN rather than fail to parse.
pub(crate) mod nullable {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }

    pub fn deserialize_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

// ---------------------------------------------------------------------------
// AgentTotals: one agent's rate card reduced to base-currency scalars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTotals {
    pub agent_name: String,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub total_per_cbm: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub total_per_ton: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub total_minimum: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub total_maximum: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub total_per_bl: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub rebate_per_cbm: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub rebate_per_ton: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub rebate_per_bl: f64,
    #[serde(deserialize_with = "nullable::deserialize")]
    pub rebate_per_container: f64,
    pub remark: String,
    /// Set when a row's currency could not be converted; the affected
    /// totals are NaN.
    pub incomplete: bool,
}

impl AgentTotals {
    pub fn zero(agent_name: &str) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            total_per_cbm: 0.0,
            total_per_ton: 0.0,
            total_minimum: 0.0,
            total_maximum: 0.0,
            total_per_bl: 0.0,
            rebate_per_cbm: 0.0,
            rebate_per_ton: 0.0,
            rebate_per_bl: 0.0,
            rebate_per_container: 0.0,
            remark: String::new(),
            incomplete: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ChargeType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeType {
    #[serde(rename = "Destination Charges")]
    DestinationCharges,
    #[serde(rename = "Fixed Charges (BL)")]
    FixedChargesBl,
    #[serde(rename = "Rebate (CBM or Ton)")]
    RebateCbmOrTon,
    #[serde(rename = "Rebate (BL)")]
    RebateBl,
    #[serde(rename = "Net Charges")]
    NetCharges,
}

impl ChargeType {
    /// Output order of the five rows emitted per agent.
    pub const ALL: [ChargeType; 5] = [
        ChargeType::DestinationCharges,
        ChargeType::FixedChargesBl,
        ChargeType::RebateCbmOrTon,
        ChargeType::RebateBl,
        ChargeType::NetCharges,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChargeType::DestinationCharges => "Destination Charges",
            ChargeType::FixedChargesBl => "Fixed Charges (BL)",
            ChargeType::RebateCbmOrTon => "Rebate (CBM or Ton)",
            ChargeType::RebateBl => "Rebate (BL)",
            ChargeType::NetCharges => "Net Charges",
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ComparisonRow: one charge type for one agent across the volume sweep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub agent_name: String,
    pub remarks: String,
    pub charge_type: ChargeType,
    /// `values[n - 1]` is the figure for a shipment of `n` CBM.
    #[serde(deserialize_with = "nullable::deserialize_vec")]
    pub values: Vec<f64>,
}

impl ComparisonRow {
    /// Figure for a shipment of `cbm` cubic meters (1-based).
    pub fn value_at(&self, cbm: usize) -> Option<f64> {
        cbm.checked_sub(1).and_then(|i| self.values.get(i).copied())
    }

    /// Flatten into the tabular layout used for export:
    /// `Agent Name`, `Remarks`, `Type`, `CBM 1` .. `CBM n`.
    pub fn to_record(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut record = serde_json::Map::new();
        record.insert("Agent Name".to_string(), self.agent_name.clone().into());
        record.insert("Remarks".to_string(), self.remarks.clone().into());
        record.insert("Type".to_string(), self.charge_type.label().into());
        for (i, value) in self.values.iter().enumerate() {
            let cell = serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null);
            record.insert(format!("CBM {}", i + 1), cell);
        }
        record
    }
}

// ---------------------------------------------------------------------------
// NominationRow: profitability of one agent in one container size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominationRow {
    #[serde(rename = "Agent Name")]
    pub agent_name: String,
    #[serde(rename = "Container Type")]
    pub container: ContainerSize,
    #[serde(rename = "Box Rate")]
    pub box_rate: f64,
    #[serde(rename = "Total Loadability")]
    pub loadability: f64,
    #[serde(rename = "Freight Cost")]
    pub freight_cost: f64,
    #[serde(rename = "Total Number of BLs")]
    pub num_bl: f64,
    #[serde(rename = "Market Rate")]
    pub market_rate: f64,
    #[serde(rename = "Nomination Rate")]
    pub nomination_rate: f64,
    #[serde(rename = "Transhipment CBM")]
    pub transhipment_cbm: f64,
    #[serde(rename = "Transhipment Number of BLs")]
    pub transhipment_num_bl: f64,
    #[serde(rename = "Transhipment Profitability Per CBM")]
    pub transhipment_profit_per_cbm: f64,
    #[serde(rename = "Rebate Per CBM", deserialize_with = "nullable::deserialize")]
    pub rebate_per_cbm: f64,
    #[serde(rename = "Rebate Per BL", deserialize_with = "nullable::deserialize")]
    pub rebate_per_bl: f64,
    #[serde(rename = "Rebate Per Container", deserialize_with = "nullable::deserialize")]
    pub rebate_per_container: f64,
    #[serde(rename = "Nomination CBM")]
    pub nomination_cbm: f64,
    #[serde(rename = "Nomination BL")]
    pub nomination_bl: f64,
    #[serde(rename = "Considered CBM")]
    pub considered_cbm: f64,
    #[serde(rename = "Considered BLs")]
    pub considered_bl: f64,
    #[serde(rename = "Free Hand CBM")]
    pub free_hand_cbm: f64,
    #[serde(rename = "Free Hand BL")]
    pub free_hand_bl: i64,
    #[serde(rename = "Profitability on Free Hand", deserialize_with = "nullable::deserialize")]
    pub profit_free_hand: f64,
    #[serde(rename = "Profitability on Nomination")]
    pub profit_nomination: f64,
    #[serde(rename = "Sum of Profitability", deserialize_with = "nullable::deserialize")]
    pub profit_sum: f64,
}

// ---------------------------------------------------------------------------
// CalculationWarning: non-fatal findings returned next to the results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationWarning {
    #[error("agent '{agent}': currency '{currency}' on '{description}' is not in the rate table")]
    UnresolvedCurrency {
        agent: String,
        description: String,
        currency: String,
    },

    #[error("agent '{agent}' has more than one Remarks row; the first one is used")]
    DuplicateRemarks { agent: String },
}

impl CalculationWarning {
    pub fn agent(&self) -> &str {
        match self {
            CalculationWarning::UnresolvedCurrency { agent, .. } => agent,
            CalculationWarning::DuplicateRemarks { agent } => agent,
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation: full result set of one request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Calculation {
    /// Five rows per agent, in agent order.
    pub comparison: Vec<ComparisonRow>,
    /// Two rows per agent (20' then 40'), in agent order.
    pub nominations: Vec<NominationRow>,
    pub totals: Vec<AgentTotals>,
    #[serde(default)]
    pub warnings: Vec<CalculationWarning>,
}

impl Calculation {
    pub fn agents(&self) -> Vec<&str> {
        self.totals.iter().map(|t| t.agent_name.as_str()).collect()
    }

    pub fn totals_for(&self, agent: &str) -> Option<&AgentTotals> {
        self.totals.iter().find(|t| t.agent_name == agent)
    }

    pub fn row(&self, agent: &str, charge_type: ChargeType) -> Option<&ComparisonRow> {
        self.comparison
            .iter()
            .find(|r| r.agent_name == agent && r.charge_type == charge_type)
    }

    pub fn nomination(&self, agent: &str, container: ContainerSize) -> Option<&NominationRow> {
        self.nominations
            .iter()
            .find(|r| r.agent_name == agent && r.container == container)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
