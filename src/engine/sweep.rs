//! Volume sweep: destination charges for 1..=30 CBM.
//!
//! At each volume the agent is charged on whichever basis is larger, per
//! CBM or per ton (one ton counted as two CBM). Ties go to the CBM basis.
//! The rebate always follows the basis the charge used.

use crate::config::{CBM_PER_TON, MAX_VOLUME_CBM};
use crate::models::{AgentTotals, ChargeType, ComparisonRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeBasis {
    Cbm,
    Ton,
    /// One of the bases is NaN because a currency could not be converted.
    Unresolved,
}

/// Charges for one agent at one shipment volume, unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumePoint {
    pub cbm: usize,
    pub basis: ChargeBasis,
    /// Volume-dependent charge on the chosen basis.
    pub basis_charge: f64,
    pub fixed_charge: f64,
    pub rebate: f64,
    pub rebate_bl: f64,
}

impl VolumePoint {
    /// Chosen basis plus the fixed per-BL charges.
    pub fn destination_charge(&self) -> f64 {
        self.fixed_charge + self.basis_charge
    }

    pub fn net_charge(&self) -> f64 {
        self.destination_charge() - self.rebate - self.rebate_bl
    }

    fn value(&self, charge_type: ChargeType) -> f64 {
        match charge_type {
            ChargeType::DestinationCharges => self.basis_charge,
            ChargeType::FixedChargesBl => self.fixed_charge,
            ChargeType::RebateCbmOrTon => self.rebate,
            ChargeType::RebateBl => self.rebate_bl,
            ChargeType::NetCharges => self.net_charge(),
        }
    }
}

pub fn price_at(totals: &AgentTotals, cbm: usize) -> VolumePoint {
    let n = cbm as f64;
    let tons = n / CBM_PER_TON;
    let cbm_basis = totals.total_per_cbm * n;
    let ton_basis = totals.total_per_ton * tons;

    let (basis, basis_charge, rebate) = if cbm_basis.is_nan() || ton_basis.is_nan() {
        (ChargeBasis::Unresolved, f64::NAN, f64::NAN)
    } else if ton_basis > cbm_basis {
        (ChargeBasis::Ton, ton_basis, totals.rebate_per_ton * tons)
    } else {
        (ChargeBasis::Cbm, cbm_basis, totals.rebate_per_cbm * n)
    };

    VolumePoint {
        cbm,
        basis,
        basis_charge,
        fixed_charge: totals.total_per_bl,
        rebate,
        rebate_bl: totals.rebate_per_bl,
    }
}

/// The five comparison rows for one agent, values rounded to cents.
pub fn sweep(totals: &AgentTotals) -> Vec<ComparisonRow> {
    let points: Vec<VolumePoint> = (1..=MAX_VOLUME_CBM).map(|n| price_at(totals, n)).collect();

    ChargeType::ALL
        .iter()
        .map(|&charge_type| ComparisonRow {
            agent_name: totals.agent_name.clone(),
            remarks: totals.remark.clone(),
            charge_type,
            values: points.iter().map(|p| round2(p.value(charge_type))).collect(),
        })
        .collect()
}

/// Round to cents, exact halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
