use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{FORTY_FOOT_LABEL, TWENTY_FOOT_LABEL};
use crate::error::{LclError, Result};

// ---------------------------------------------------------------------------
// ContainerSize
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    #[serde(rename = "20'STD")]
    TwentyFoot,
    #[serde(rename = "40'STD")]
    FortyFoot,
}

impl ContainerSize {
    pub const ALL: [ContainerSize; 2] = [ContainerSize::TwentyFoot, ContainerSize::FortyFoot];

    pub fn label(&self) -> &'static str {
        match self {
            ContainerSize::TwentyFoot => TWENTY_FOOT_LABEL,
            ContainerSize::FortyFoot => FORTY_FOOT_LABEL,
        }
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ContainerInput: container fields as typed into the form
// ---------------------------------------------------------------------------

/// Raw text for one container profile, before validation.
///
/// Unlike charge amounts these fields are not coerced: a box rate or
/// loadability that is not a number aborts the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInput {
    pub box_rate: String,
    pub loadability: String,
    pub num_bl: String,
    pub market_rate: String,
    pub transhipment_cbm: String,
    pub transhipment_num_bl: String,
    pub transhipment_profit_per_cbm: String,
}

impl Default for ContainerInput {
    fn default() -> Self {
        let zero = || "0".to_string();
        Self {
            box_rate: zero(),
            loadability: zero(),
            num_bl: zero(),
            market_rate: zero(),
            transhipment_cbm: zero(),
            transhipment_num_bl: zero(),
            transhipment_profit_per_cbm: zero(),
        }
    }
}

fn parse_field(size: ContainerSize, field: &'static str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LclError::InvalidContainerField {
            container: size.label().to_string(),
            field,
            value: text.to_string(),
        })
}

// ---------------------------------------------------------------------------
// ContainerProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerProfile {
    pub size: ContainerSize,
    /// Freight paid for the whole box, USD.
    pub box_rate: f64,
    /// Usable capacity in CBM.
    pub loadability: f64,
    pub num_bl: f64,
    /// Selling rate per CBM on the open market, USD.
    pub market_rate: f64,
    pub transhipment_cbm: f64,
    pub transhipment_num_bl: f64,
    pub transhipment_profit_per_cbm: f64,
}

impl ContainerProfile {
    /// A profile with every figure zero except the given box rate and loadability.
    pub fn new(size: ContainerSize, box_rate: f64, loadability: f64) -> Self {
        Self {
            size,
            box_rate,
            loadability,
            num_bl: 0.0,
            market_rate: 0.0,
            transhipment_cbm: 0.0,
            transhipment_num_bl: 0.0,
            transhipment_profit_per_cbm: 0.0,
        }
    }

    pub fn num_bl(mut self, value: f64) -> Self {
        self.num_bl = value;
        self
    }

    pub fn market_rate(mut self, value: f64) -> Self {
        self.market_rate = value;
        self
    }

    pub fn transhipment(mut self, cbm: f64, num_bl: f64, profit_per_cbm: f64) -> Self {
        self.transhipment_cbm = cbm;
        self.transhipment_num_bl = num_bl;
        self.transhipment_profit_per_cbm = profit_per_cbm;
        self
    }

    /// Parse the text of a container form.
    pub fn parse(size: ContainerSize, input: &ContainerInput) -> Result<Self> {
        let profile = Self {
            size,
            box_rate: parse_field(size, "box rate", &input.box_rate)?,
            loadability: parse_field(size, "loadability", &input.loadability)?,
            num_bl: parse_field(size, "number of BLs", &input.num_bl)?,
            market_rate: parse_field(size, "market rate", &input.market_rate)?,
            transhipment_cbm: parse_field(size, "transhipment CBM", &input.transhipment_cbm)?,
            transhipment_num_bl: parse_field(
                size,
                "transhipment number of BLs",
                &input.transhipment_num_bl,
            )?,
            transhipment_profit_per_cbm: parse_field(
                size,
                "transhipment profitability per CBM",
                &input.transhipment_profit_per_cbm,
            )?,
        };
        Ok(profile)
    }

    /// Check the profile can be used for a calculation.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("box rate", self.box_rate),
            ("loadability", self.loadability),
            ("number of BLs", self.num_bl),
            ("market rate", self.market_rate),
            ("transhipment CBM", self.transhipment_cbm),
            ("transhipment number of BLs", self.transhipment_num_bl),
            ("transhipment profitability per CBM", self.transhipment_profit_per_cbm),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LclError::InvalidContainerField {
                    container: self.size.label().to_string(),
                    field,
                    value: value.to_string(),
                });
            }
        }
        if self.loadability <= 0.0 {
            return Err(LclError::ZeroLoadability {
                container: self.size.label().to_string(),
            });
        }
        Ok(())
    }

    /// Box rate spread over the loadable volume.
    pub fn freight_cost_per_cbm(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.box_rate / self.loadability)
    }

    /// Volume left once the transhipment carve-out is removed.
    pub fn considered_cbm(&self) -> f64 {
        self.loadability - self.transhipment_cbm
    }

    pub fn considered_bl(&self) -> f64 {
        self.num_bl - self.transhipment_num_bl
    }
}

// ---------------------------------------------------------------------------
// ContainerProfiles: the 20' and 40' pair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerProfiles {
    #[serde(rename = "20'STD")]
    twenty: ContainerProfile,
    #[serde(rename = "40'STD")]
    forty: ContainerProfile,
}

impl ContainerProfiles {
    pub fn new(twenty: ContainerProfile, forty: ContainerProfile) -> Result<Self> {
        let profiles = Self { twenty, forty };
        profiles.check_sizes()?;
        Ok(profiles)
    }

    /// Parse both container forms; the first failing field is reported.
    pub fn parse(twenty: &ContainerInput, forty: &ContainerInput) -> Result<Self> {
        Ok(Self {
            twenty: ContainerProfile::parse(ContainerSize::TwentyFoot, twenty)?,
            forty: ContainerProfile::parse(ContainerSize::FortyFoot, forty)?,
        })
    }

    pub fn get(&self, size: ContainerSize) -> &ContainerProfile {
        match size {
            ContainerSize::TwentyFoot => &self.twenty,
            ContainerSize::FortyFoot => &self.forty,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerProfile> {
        [&self.twenty, &self.forty].into_iter()
    }

    /// Validate both profiles, 20' first.
    pub fn validate(&self) -> Result<()> {
        self.check_sizes()?;
        self.twenty.validate()?;
        self.forty.validate()
    }

    fn check_sizes(&self) -> Result<()> {
        if self.twenty.size != ContainerSize::TwentyFoot || self.forty.size != ContainerSize::FortyFoot
        {
            return Err(LclError::InvalidArgument(format!(
                "container profiles must be {} and {} (got {} and {})",
                TWENTY_FOOT_LABEL, FORTY_FOOT_LABEL, self.twenty.size, self.forty.size
            )));
        }
        Ok(())
    }
}
