//! Nomination versus free-hand profitability per container.

use crate::error::Result;
use crate::models::{
    AgentTotals, ContainerProfile, ContainerProfiles, NominationRecord, NominationRow,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominationOutcome {
    pub free_hand_cbm: f64,
    pub free_hand_bl: i64,
    pub profit_free_hand: f64,
    pub profit_nomination: f64,
    pub profit_sum: f64,
}

/// Split a container between nominated and free-hand cargo and price both.
///
/// Free-hand cargo sells at the market rate and earns the per-CBM and
/// per-BL rebates; nominated cargo sells at the contracted rate. The sum
/// adds the per-container rebate and the transhipment carve-out.
pub fn nomination_profit(
    container: &ContainerProfile,
    freight_cost: f64,
    record: &NominationRecord,
    totals: &AgentTotals,
) -> NominationOutcome {
    let free_hand_cbm = container.considered_cbm() - record.nomination_cbm;
    let free_hand_bl = (container.considered_bl() - record.nomination_bl.trunc()).trunc() as i64;

    let profit_free_hand = free_hand_cbm * container.market_rate
        + free_hand_cbm * totals.rebate_per_cbm
        - free_hand_cbm * freight_cost
        + free_hand_bl as f64 * totals.rebate_per_bl;
    let profit_nomination = (record.nomination_rate - freight_cost) * record.nomination_cbm;
    let profit_sum = profit_free_hand
        + profit_nomination
        + totals.rebate_per_container
        + container.transhipment_cbm * container.transhipment_profit_per_cbm;

    NominationOutcome {
        free_hand_cbm,
        free_hand_bl,
        profit_free_hand,
        profit_nomination,
        profit_sum,
    }
}

/// One row per container size (20' then 40') for an agent.
pub fn nomination_rows(
    totals: &AgentTotals,
    record: &NominationRecord,
    containers: &ContainerProfiles,
) -> Result<Vec<NominationRow>> {
    let mut rows = Vec::with_capacity(2);
    for container in containers.iter() {
        let freight_cost = container.freight_cost_per_cbm()?;
        let outcome = nomination_profit(container, freight_cost, record, totals);
        rows.push(NominationRow {
            agent_name: totals.agent_name.clone(),
            container: container.size,
            box_rate: container.box_rate,
            loadability: container.loadability,
            freight_cost,
            num_bl: container.num_bl,
            market_rate: container.market_rate,
            nomination_rate: record.nomination_rate,
            transhipment_cbm: container.transhipment_cbm,
            transhipment_num_bl: container.transhipment_num_bl,
            transhipment_profit_per_cbm: container.transhipment_profit_per_cbm,
            rebate_per_cbm: totals.rebate_per_cbm,
            rebate_per_bl: totals.rebate_per_bl,
            rebate_per_container: totals.rebate_per_container,
            nomination_cbm: record.nomination_cbm,
            nomination_bl: record.nomination_bl,
            considered_cbm: container.considered_cbm(),
            considered_bl: container.considered_bl(),
            free_hand_cbm: outcome.free_hand_cbm,
            free_hand_bl: outcome.free_hand_bl,
            profit_free_hand: outcome.profit_free_hand,
            profit_nomination: outcome.profit_nomination,
            profit_sum: outcome.profit_sum,
        });
    }
    Ok(rows)
}
