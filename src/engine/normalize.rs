//! Charge normalization.
//!
//! Converts every agent's charge rows into the base currency and reduces
//! them to a single [`AgentTotals`] per agent. Rows are partitioned by
//! description: `Rebate` rows become the rebate figures, `Remarks` rows
//! supply the remark text and every other row is an ordinary charge head.

use std::collections::HashMap;

use crate::error::{LclError, Result};
use crate::models::{AgentTotals, CalculationWarning, ChargeRow, ExchangeRateTable, RowKind};

/// Per-agent totals in first-appearance order, plus the warnings raised
/// while building them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalization {
    pub totals: Vec<AgentTotals>,
    pub warnings: Vec<CalculationWarning>,
}

impl Normalization {
    pub fn get(&self, agent: &str) -> Option<&AgentTotals> {
        self.totals.iter().find(|t| t.agent_name == agent)
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.get(agent).is_some()
    }
}

/// Reduce `rows` to one set of base-currency totals per agent.
///
/// Blank rows are skipped. A row whose currency is missing from `rates`
/// contributes NaN to every column it touches and marks the agent
/// incomplete. A second `Rebate` row for the same agent is an error.
pub fn normalize(rows: &[ChargeRow], rates: &ExchangeRateTable) -> Result<Normalization> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&ChargeRow>> = HashMap::new();

    for row in rows.iter().filter(|r| !r.is_blank()) {
        let agent = row.agent_name.as_str();
        grouped
            .entry(agent)
            .or_insert_with(|| {
                order.push(agent);
                Vec::new()
            })
            .push(row);
    }

    let mut out = Normalization::default();
    for agent in order {
        let agent_rows = grouped.get(agent).map(Vec::as_slice).unwrap_or_default();
        let totals = reduce_agent(agent, agent_rows, rates, &mut out.warnings)?;
        tracing::debug!(
            agent,
            per_cbm = totals.total_per_cbm,
            per_ton = totals.total_per_ton,
            per_bl = totals.total_per_bl,
            incomplete = totals.incomplete,
            "normalized agent charges"
        );
        out.totals.push(totals);
    }
    Ok(out)
}

fn reduce_agent(
    agent: &str,
    rows: &[&ChargeRow],
    rates: &ExchangeRateTable,
    warnings: &mut Vec<CalculationWarning>,
) -> Result<AgentTotals> {
    let mut totals = AgentTotals::zero(agent);
    let mut rebate: Option<&ChargeRow> = None;
    let mut remark: Option<&ChargeRow> = None;
    let mut duplicate_remarks = false;

    for &row in rows {
        match row.kind() {
            RowKind::Rebate => {
                if rebate.is_some() {
                    return Err(LclError::DuplicateRebate {
                        agent: agent.to_string(),
                    });
                }
                rebate = Some(row);
            }
            RowKind::Remarks => {
                if remark.is_none() {
                    remark = Some(row);
                } else if !duplicate_remarks {
                    duplicate_remarks = true;
                    warnings.push(CalculationWarning::DuplicateRemarks {
                        agent: agent.to_string(),
                    });
                }
            }
            RowKind::Charge => {
                let rate = resolve_rate(row, rates, &mut totals, warnings);
                totals.total_per_cbm += row.per_cbm * rate;
                totals.total_per_ton += row.per_ton * rate;
                totals.total_minimum += row.minimum * rate;
                totals.total_maximum += row.maximum * rate;
                totals.total_per_bl += row.per_bl * rate;
            }
        }
    }

    if let Some(row) = rebate {
        let rate = resolve_rate(row, rates, &mut totals, warnings);
        totals.rebate_per_cbm = row.per_cbm * rate;
        totals.rebate_per_ton = row.per_ton * rate;
        totals.rebate_per_bl = row.per_bl * rate;
        totals.rebate_per_container = row.per_container * rate;
    }

    if let Some(row) = remark {
        totals.remark = row.currency.trim().to_string();
    }

    Ok(totals)
}

/// Rate for the row's currency, or NaN (with a warning) when unknown.
fn resolve_rate(
    row: &ChargeRow,
    rates: &ExchangeRateTable,
    totals: &mut AgentTotals,
    warnings: &mut Vec<CalculationWarning>,
) -> f64 {
    match rates.get(&row.currency) {
        Some(rate) => rate,
        None => {
            totals.incomplete = true;
            warnings.push(CalculationWarning::UnresolvedCurrency {
                agent: row.agent_name.clone(),
                description: row.description.clone(),
                currency: row.currency.clone(),
            });
            f64::NAN
        }
    }
}
