//! Comparison engine: charge normalization, volume sweep and nomination
//! profitability. Everything here is a pure function of its inputs.

pub mod nomination;
pub mod normalize;
pub mod sweep;

pub use nomination::{nomination_profit, nomination_rows, NominationOutcome};
pub use normalize::{normalize, Normalization};
pub use sweep::{price_at, round2, sweep, ChargeBasis, VolumePoint};

use std::collections::HashSet;

use crate::error::{LclError, Result};
use crate::models::{AgentTotals, Calculation, CalculationRequest};

/// Run a full calculation.
///
/// Fatal problems (bad container profile, duplicate rebate rows, a missing
/// or repeated nomination record) abort before any agent is priced.
/// Unconvertible currencies are reported in [`Calculation::warnings`] and the
/// affected figures are NaN.
pub fn calculate(request: &CalculationRequest) -> Result<Calculation> {
    request.containers.validate()?;

    let mut normalization = normalize(&request.charge_rows, &request.rate_table)?;

    let mut nominated = HashSet::new();
    for record in &request.nomination_records {
        if !nominated.insert(record.agent_name.as_str()) {
            return Err(LclError::DuplicateNomination {
                agent: record.agent_name.clone(),
            });
        }
    }

    if let Some(missing) = normalization
        .totals
        .iter()
        .find(|t| !nominated.contains(t.agent_name.as_str()))
    {
        return Err(LclError::MissingNomination {
            agent: missing.agent_name.clone(),
        });
    }

    // Agents with a nomination record but no charge rows quote nothing.
    let quiet: Vec<AgentTotals> = request
        .nomination_records
        .iter()
        .filter(|r| !normalization.contains(&r.agent_name))
        .map(|r| AgentTotals::zero(&r.agent_name))
        .collect();
    normalization.totals.extend(quiet);
    let Normalization { totals, warnings } = normalization;

    let mut calculation = Calculation {
        comparison: Vec::with_capacity(totals.len() * 5),
        nominations: Vec::with_capacity(totals.len() * 2),
        totals: Vec::new(),
        warnings,
    };

    for agent in &totals {
        calculation.comparison.extend(sweep(agent));
        if let Some(record) = request.nomination_for(&agent.agent_name) {
            calculation
                .nominations
                .extend(nomination_rows(agent, record, &request.containers)?);
        }
    }
    calculation.totals = totals;

    for warning in &calculation.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!(
        agents = calculation.totals.len(),
        rows = calculation.comparison.len(),
        warnings = calculation.warnings.len(),
        "calculation complete"
    );

    Ok(calculation)
}
