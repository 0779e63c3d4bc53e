//! Unit tests for the SqlBuilder query construction.

use lcl_charges::sql_builder::quote_ident;
use lcl_charges::SqlBuilder;

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("exchange_rates").build();
    assert_eq!(sql, "SELECT *\nFROM exchange_rates");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("exchange_rates")
        .select(&["\"Currency\"", "\"Exchange Rate to USD\""])
        .build();
    assert!(sql.starts_with("SELECT \"Currency\", \"Exchange Rate to USD\"\n"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_eq_adds_equality_with_param() {
    let (sql, params) = SqlBuilder::new("pod_locations")
        .where_eq("\"POD\"", "Hamburg")
        .build();
    assert!(sql.contains("WHERE \"POD\" = ?"));
    assert_eq!(params, vec!["Hamburg"]);
}

#[test]
fn where_not_null_takes_no_param() {
    let (sql, params) = SqlBuilder::new("pod_locations")
        .where_not_null("\"POD\"")
        .build();
    assert!(sql.contains("WHERE \"POD\" IS NOT NULL"));
    assert!(params.is_empty());
}

#[test]
fn multiple_conditions_joined_with_and() {
    let (sql, params) = SqlBuilder::new("exchange_rates")
        .where_not_null("\"Exchange Rate to USD\"")
        .where_eq("\"Currency\"", "EUR")
        .build();
    assert!(sql.contains("WHERE \"Exchange Rate to USD\" IS NOT NULL AND \"Currency\" = ?"));
    assert_eq!(params, vec!["EUR"]);
}

// ---------------------------------------------------------------------------
// DISTINCT / ORDER BY / LIMIT
// ---------------------------------------------------------------------------

#[test]
fn distinct_adds_keyword() {
    let (sql, _) = SqlBuilder::new("pod_locations").distinct().build();
    assert!(sql.starts_with("SELECT DISTINCT *"));
}

#[test]
fn order_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("exchange_rates")
        .order_by(&["\"Currency\" ASC", "\"Exchange Rate to USD\" DESC"])
        .build();
    assert!(sql.contains("ORDER BY \"Currency\" ASC, \"Exchange Rate to USD\" DESC"));
}

#[test]
fn limit_adds_clause() {
    let (sql, _) = SqlBuilder::new("exchange_rates").limit(1).build();
    assert!(sql.ends_with("LIMIT 1"));
}

#[test]
fn combined_builder_chains_correctly() {
    let pod = quote_ident("POD");
    let order = format!("{} ASC", pod);
    let (sql, params) = SqlBuilder::new("pod_locations")
        .select(&[pod.as_str()])
        .distinct()
        .where_not_null(&pod)
        .where_eq(&pod, "Jebel Ali")
        .order_by(&[order.as_str()])
        .limit(5)
        .build();

    assert_eq!(
        sql,
        "SELECT DISTINCT \"POD\"\nFROM pod_locations\n\
         WHERE \"POD\" IS NOT NULL AND \"POD\" = ?\n\
         ORDER BY \"POD\" ASC\nLIMIT 5"
    );
    assert_eq!(params, vec!["Jebel Ali"]);
}

// ---------------------------------------------------------------------------
// quote_ident
// ---------------------------------------------------------------------------

#[test]
fn quote_ident_wraps_and_escapes() {
    assert_eq!(quote_ident("Exchange Rate to USD"), "\"Exchange Rate to USD\"");
    assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
}
