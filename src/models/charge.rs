use serde::{Deserialize, Serialize};

use crate::config::{REBATE_DESCRIPTION, REMARKS_DESCRIPTION};

// ---------------------------------------------------------------------------
// Amount coercion
// ---------------------------------------------------------------------------

/// Coerce free text typed into a monetary field into a number.
///
/// Blank, unparseable and non-finite input all become `0.0`.
pub fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Serde helper accepting numbers, numeric strings, blanks and null.
pub(crate) mod amount {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
            Some(Value::String(s)) => super::parse_amount(&s),
            _ => 0.0,
        })
    }
}

// ---------------------------------------------------------------------------
// RowKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Ordinary charge head, summed after conversion.
    Charge,
    /// Free-text remark carried in the currency column.
    Remarks,
    Rebate,
}

// ---------------------------------------------------------------------------
// ChargeRow: one line item quoted by one agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRow {
    #[serde(rename = "Agent Name")]
    pub agent_name: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Currency code, or the remark text on a `Remarks` row.
    #[serde(rename = "Currency", default)]
    pub currency: String,
    #[serde(rename = "Per CBM", default, deserialize_with = "amount::deserialize")]
    pub per_cbm: f64,
    #[serde(rename = "Per Ton", default, deserialize_with = "amount::deserialize")]
    pub per_ton: f64,
    #[serde(rename = "Minimum", default, deserialize_with = "amount::deserialize")]
    pub minimum: f64,
    #[serde(rename = "Maximum", default, deserialize_with = "amount::deserialize")]
    pub maximum: f64,
    #[serde(rename = "Per BL", default, deserialize_with = "amount::deserialize")]
    pub per_bl: f64,
    #[serde(rename = "Per Container", default, deserialize_with = "amount::deserialize")]
    pub per_container: f64,
    /// Carried for export only; VAT never enters a calculation.
    #[serde(rename = "VAT %", default, deserialize_with = "amount::deserialize")]
    pub vat_percent: f64,
}

impl ChargeRow {
    /// An ordinary charge head with all amounts zero.
    pub fn new(agent_name: &str, description: &str, currency: &str) -> Self {
        Self {
            agent_name: agent_name.to_string(),
            description: description.to_string(),
            currency: currency.to_string(),
            per_cbm: 0.0,
            per_ton: 0.0,
            minimum: 0.0,
            maximum: 0.0,
            per_bl: 0.0,
            per_container: 0.0,
            vat_percent: 0.0,
        }
    }

    pub fn remarks(agent_name: &str, text: &str) -> Self {
        Self::new(agent_name, REMARKS_DESCRIPTION, text)
    }

    pub fn rebate(agent_name: &str, currency: &str) -> Self {
        Self::new(agent_name, REBATE_DESCRIPTION, currency)
    }

    pub fn per_cbm(mut self, value: f64) -> Self {
        self.per_cbm = value;
        self
    }

    pub fn per_ton(mut self, value: f64) -> Self {
        self.per_ton = value;
        self
    }

    pub fn minimum(mut self, value: f64) -> Self {
        self.minimum = value;
        self
    }

    pub fn maximum(mut self, value: f64) -> Self {
        self.maximum = value;
        self
    }

    pub fn per_bl(mut self, value: f64) -> Self {
        self.per_bl = value;
        self
    }

    pub fn per_container(mut self, value: f64) -> Self {
        self.per_container = value;
        self
    }

    pub fn vat_percent(mut self, value: f64) -> Self {
        self.vat_percent = value;
        self
    }

    pub fn kind(&self) -> RowKind {
        match self.description.trim() {
            REBATE_DESCRIPTION => RowKind::Rebate,
            REMARKS_DESCRIPTION => RowKind::Remarks,
            _ => RowKind::Charge,
        }
    }

    /// Empty form slots have a blank description and carry no data.
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
    }
}
