mod common;

use common::{assert_close, containers, forty_foot, mixed_rates};
use lcl_charges::calculate;
use lcl_charges::models::*;
use lcl_charges::LclError;

fn two_agent_request() -> CalculationRequest {
    CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "EUR").per_cbm(8.0).per_bl(20.0))
        .charge(ChargeRow::new("Agent 1", "DO fee", "USD").per_bl(15.0))
        .charge(ChargeRow::remarks("Agent 1", "Min 1 CBM"))
        .charge(ChargeRow::rebate("Agent 1", "USD").per_cbm(2.0).per_bl(5.0))
        .charge(ChargeRow::new("Agent 2", "THC", "AED").per_cbm(40.0).per_ton(100.0))
        .nomination(NominationRecord::new("Agent 1", 30.0, 10.0, 2.0))
        .nomination(NominationRecord::none("Agent 2"))
}

#[test]
fn produces_five_comparison_and_two_nomination_rows_per_agent() {
    let result = calculate(&two_agent_request()).unwrap();

    assert_eq!(result.agents(), vec!["Agent 1", "Agent 2"]);
    assert_eq!(result.comparison.len(), 10);
    assert_eq!(result.nominations.len(), 4);
    assert!(!result.has_warnings());

    assert_eq!(result.comparison[0].agent_name, "Agent 1");
    assert_eq!(result.comparison[5].agent_name, "Agent 2");
    assert_eq!(result.nominations[0].container, ContainerSize::TwentyFoot);
    assert_eq!(result.nominations[3].container, ContainerSize::FortyFoot);
}

#[test]
fn comparison_figures_follow_converted_totals() {
    let result = calculate(&two_agent_request()).unwrap();

    // Agent 1: 8 EUR = 10 USD per CBM, 20 EUR + 15 USD = 40 USD per BL
    let net = result.row("Agent 1", ChargeType::NetCharges).unwrap();
    assert_eq!(net.remarks, "Min 1 CBM");
    assert_close(net.value_at(1).unwrap(), 10.0 + 40.0 - 2.0 - 5.0);
    assert_close(net.value_at(30).unwrap(), 300.0 + 40.0 - 60.0 - 5.0);

    // Agent 2: 10 USD per CBM against 25 USD per ton (12.5 per CBM)
    let dest = result.row("Agent 2", ChargeType::DestinationCharges).unwrap();
    assert_close(dest.value_at(2).unwrap(), 25.0);

    let totals = result.totals_for("Agent 2").unwrap();
    assert_close(totals.total_per_cbm, 10.0);
    assert_close(totals.total_per_ton, 25.0);
}

#[test]
fn nomination_rows_use_agent_rebates() {
    let result = calculate(&two_agent_request()).unwrap();

    let row = result
        .nomination("Agent 1", ContainerSize::TwentyFoot)
        .unwrap();
    assert_eq!(row.rebate_per_cbm, 2.0);
    assert_eq!(row.rebate_per_bl, 5.0);
    // 18 free-hand CBM and 3 free-hand BLs on top of the plain split
    assert_close(row.profit_sum, 20.0 + 36.0 + 15.0);

    let empty = result.nomination("Agent 2", ContainerSize::FortyFoot).unwrap();
    assert_close(empty.free_hand_cbm, 58.0);
    assert_close(empty.profit_sum, 58.0 * 8.0);
}

#[test]
fn usd_card_without_rebate_prices_linearly() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "USD").per_cbm(5.0).per_bl(100.0))
        .nomination(NominationRecord::none("Agent 1"));

    let result = calculate(&request).unwrap();
    let at_ten = |charge_type| {
        result
            .row("Agent 1", charge_type)
            .and_then(|r| r.value_at(10))
            .unwrap()
    };

    assert_eq!(at_ten(ChargeType::DestinationCharges), 50.0);
    assert_eq!(at_ten(ChargeType::FixedChargesBl), 100.0);
    assert_eq!(at_ten(ChargeType::RebateCbmOrTon), 0.0);
    assert_eq!(at_ten(ChargeType::RebateBl), 0.0);
    assert_eq!(at_ten(ChargeType::NetCharges), 150.0);
}

#[test]
fn repeated_nomination_record_aborts() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "USD").per_cbm(5.0))
        .nomination(NominationRecord::new("Agent 1", 30.0, 10.0, 2.0))
        .nomination(NominationRecord::new("Agent 1", 45.0, 4.0, 1.0));

    match calculate(&request).unwrap_err() {
        LclError::DuplicateNomination { agent } => assert_eq!(agent, "Agent 1"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn repeated_record_for_nomination_only_agent_aborts() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .nomination(NominationRecord::none("Agent 9"))
        .nomination(NominationRecord::none("Agent 9"));

    assert!(matches!(
        calculate(&request).unwrap_err(),
        LclError::DuplicateNomination { .. }
    ));
}

#[test]
fn agent_without_nomination_record_aborts() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "USD").per_cbm(5.0))
        .charge(ChargeRow::new("Agent 2", "THC", "USD").per_cbm(6.0))
        .nomination(NominationRecord::none("Agent 1"));

    match calculate(&request).unwrap_err() {
        LclError::MissingNomination { agent } => assert_eq!(agent, "Agent 2"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn container_errors_are_reported_before_agent_errors() {
    let profiles = ContainerProfiles::new(
        ContainerProfile::new(ContainerSize::TwentyFoot, 1000.0, 0.0),
        forty_foot(),
    )
    .unwrap();
    let request = CalculationRequest::new(profiles, mixed_rates())
        .charge(ChargeRow::new("Orphan", "THC", "USD").per_cbm(5.0));

    assert!(matches!(
        calculate(&request).unwrap_err(),
        LclError::ZeroLoadability { .. }
    ));
}

#[test]
fn nomination_only_agents_are_priced_at_zero() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "USD").per_cbm(5.0))
        .nomination(NominationRecord::none("Agent 1"))
        .nomination(NominationRecord::new("Agent 9", 45.0, 5.0, 1.0));

    let result = calculate(&request).unwrap();

    assert_eq!(result.agents(), vec!["Agent 1", "Agent 9"]);
    let net = result.row("Agent 9", ChargeType::NetCharges).unwrap();
    assert!(net.values.iter().all(|v| *v == 0.0));
    assert_eq!(result.nominations.len(), 4);
}

#[test]
fn empty_request_yields_empty_result() {
    let result = calculate(&CalculationRequest::new(containers(), mixed_rates())).unwrap();
    assert_eq!(result, Calculation::default());
}

#[test]
fn unresolved_currency_is_returned_alongside_results() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::new("Agent 1", "THC", "XYZ").per_cbm(5.0).per_bl(10.0))
        .charge(ChargeRow::new("Agent 2", "THC", "USD").per_cbm(5.0))
        .nomination(NominationRecord::none("Agent 1"))
        .nomination(NominationRecord::none("Agent 2"));

    let result = calculate(&request).unwrap();

    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].agent(), "Agent 1");
    assert!(result.totals_for("Agent 1").unwrap().incomplete);

    let net = result.row("Agent 1", ChargeType::NetCharges).unwrap();
    assert!(net.values.iter().all(|v| v.is_nan()));
    let healthy = result.row("Agent 2", ChargeType::NetCharges).unwrap();
    assert_eq!(healthy.value_at(1), Some(5.0));
}

#[test]
fn duplicate_rebate_aborts_calculation() {
    let request = CalculationRequest::new(containers(), mixed_rates())
        .charge(ChargeRow::rebate("Agent 1", "USD").per_cbm(1.0))
        .charge(ChargeRow::rebate("Agent 1", "EUR").per_cbm(1.0))
        .nomination(NominationRecord::none("Agent 1"));

    assert!(matches!(
        calculate(&request).unwrap_err(),
        LclError::DuplicateRebate { .. }
    ));
}

#[test]
fn request_is_not_mutated() {
    let request = two_agent_request();
    let before = request.clone();
    calculate(&request).unwrap();
    calculate(&request).unwrap();
    assert_eq!(request, before);
}

// ---------------------------------------------------------------------------
// Container form parsing
// ---------------------------------------------------------------------------

#[test]
fn container_forms_parse_into_profiles() {
    let twenty = ContainerInput {
        box_rate: "1000".to_string(),
        loadability: " 28 ".to_string(),
        num_bl: "5".to_string(),
        market_rate: "40".to_string(),
        ..ContainerInput::default()
    };
    let forty = ContainerInput {
        box_rate: "1740".to_string(),
        loadability: "58".to_string(),
        transhipment_cbm: "4.5".to_string(),
        ..ContainerInput::default()
    };

    let profiles = ContainerProfiles::parse(&twenty, &forty).unwrap();
    assert_eq!(profiles.get(ContainerSize::TwentyFoot).loadability, 28.0);
    assert_eq!(profiles.get(ContainerSize::TwentyFoot).market_rate, 40.0);
    assert_eq!(profiles.get(ContainerSize::FortyFoot).transhipment_cbm, 4.5);
    assert_eq!(profiles.get(ContainerSize::FortyFoot).num_bl, 0.0);
}

#[test]
fn non_numeric_container_field_names_the_field() {
    let twenty = ContainerInput::default();
    let forty = ContainerInput {
        market_rate: "forty".to_string(),
        ..ContainerInput::default()
    };

    match ContainerProfiles::parse(&twenty, &forty).unwrap_err() {
        LclError::InvalidContainerField {
            container,
            field,
            value,
        } => {
            assert_eq!(container, "40'STD");
            assert_eq!(field, "market rate");
            assert_eq!(value, "forty");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn blank_container_field_is_not_coerced() {
    let twenty = ContainerInput {
        box_rate: String::new(),
        ..ContainerInput::default()
    };
    assert!(ContainerProfiles::parse(&twenty, &ContainerInput::default()).is_err());
}

#[test]
fn request_round_trips_through_json() {
    let request = two_agent_request();
    let json = serde_json::to_string(&request).unwrap();
    let back: CalculationRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);
}
