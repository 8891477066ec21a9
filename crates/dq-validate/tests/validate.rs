//! End-to-end engine scenarios.

use dq_model::{
    DatasetConstraint, Field, FieldConstraint, OrderTable, Record, ValidationConfig, Verdict,
};
use dq_validate::{Validator, validate_dataset, validate_record};

fn order(index: usize, order_id: &str) -> Record {
    Record::new(index)
        .with(Field::OrderId, order_id)
        .with(Field::Quantity, "1")
        .with(Field::Amount, "250.00")
        .with(Field::Currency, "INR")
        .with(Field::ShipCountry, "IN")
        .with(Field::OrderDate, "04-30-22")
        .with(Field::Status, "Shipped")
}

fn validate(records: Vec<Record>) -> dq_model::ValidationOutcome {
    Validator::default()
        .validate(&OrderTable::from_records(records))
        .expect("schema is complete")
}

#[test]
fn all_valid_dataset_passes() {
    let outcome = validate(vec![
        order(0, "405-1"),
        order(1, "405-2").with(Field::Status, "Delivered"),
        order(2, "405-3").with(Field::OrderDate, "12-31-21"),
    ]);

    assert_eq!(outcome.report.verdict, Verdict::Pass);
    assert!(outcome.invalid_records.is_empty());
    assert_eq!(outcome.valid_records.len(), 3);
    assert!(outcome.report.field_violations.is_empty());
    assert!(outcome.report.dataset_violations.is_empty());
}

#[test]
fn negative_amount_fails_single_record() {
    let record = order(0, "A1").with(Field::Amount, "-5");
    let row = validate_record(&record, &ValidationConfig::default());
    assert_eq!(row.len(), 1);
    assert_eq!(row[0].field, Field::Amount);

    let outcome = validate(vec![record]);
    assert_eq!(outcome.report.verdict, Verdict::Fail);
    assert_eq!(outcome.invalid_records.len(), 1);
    assert!(outcome.valid_records.is_empty());
}

#[test]
fn negative_quantity_cites_quantity_once() {
    let outcome = validate(vec![order(0, "A1"), order(1, "A2").with(Field::Quantity, "-2")]);
    let quantity: Vec<_> = outcome
        .report
        .field_violations
        .iter()
        .filter(|v| v.row == 1)
        .collect();
    assert_eq!(quantity.len(), 1);
    assert_eq!(quantity[0].field, Field::Quantity);
    assert_eq!(quantity[0].constraint, FieldConstraint::NonNegative);
    assert_eq!(outcome.invalid_records[0].index, 1);
    assert_eq!(outcome.valid_records[0].index, 0);
}

#[test]
fn duplicate_order_ids_flag_both_records() {
    let records = vec![order(0, "A1"), order(1, "A1")];
    let dataset = validate_dataset(&records, &ValidationConfig::default());
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset[0].constraint, DatasetConstraint::Unique);
    assert_eq!(dataset[0].rows, vec![0, 1]);

    let outcome = validate(records);
    assert_eq!(outcome.report.verdict, Verdict::Fail);
    assert_eq!(outcome.invalid_records.len(), 2);
    assert!(outcome.report.field_violations.is_empty());
}

#[test]
fn invalid_date_is_reported() {
    let record = order(0, "A1").with(Field::OrderDate, "13-40-99");
    let violations = validate_record(&record, &ValidationConfig::default());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, Field::OrderDate);
    assert_eq!(violations[0].constraint, FieldConstraint::DateFormat);
}

#[test]
fn disallowed_status_is_only_a_dataset_violation() {
    let outcome = validate(vec![order(0, "A1").with(Field::Status, "Returned")]);
    assert!(outcome.report.field_violations.is_empty());
    assert_eq!(outcome.report.dataset_violations.len(), 1);
    assert_eq!(
        outcome.report.dataset_violations[0].constraint,
        DatasetConstraint::AllowedValues
    );
    assert_eq!(outcome.report.invalid_count, 1);
}

#[test]
fn null_order_id_reported_at_both_levels() {
    let mut record = order(0, "A1");
    record.order_id = None;
    let outcome = validate(vec![record]);
    assert_eq!(outcome.report.field_violations.len(), 1);
    assert_eq!(
        outcome.report.field_violations[0].constraint,
        FieldConstraint::NonEmpty
    );
    assert_eq!(
        outcome.report.dataset_violations[0].constraint,
        DatasetConstraint::NotNull
    );
    assert_eq!(outcome.report.reasons_for(0).len(), 2);
}

#[test]
fn repeated_runs_are_identical() {
    let records = vec![
        order(0, "A1"),
        order(1, "A1").with(Field::Currency, "USD"),
        order(2, "B7").with(Field::OrderDate, "2022-04-30"),
        order(3, "C3").with(Field::Quantity, "x"),
    ];
    let validator = Validator::default();
    let first = validator.validate_records(&records);
    let second = validator.validate_records(&records);
    assert_eq!(first, second);
}

#[test]
fn custom_config_changes_expectations() {
    let config = ValidationConfig::default()
        .with_currency("USD")
        .with_ship_country("US")
        .with_date_format("%Y-%m-%d")
        .with_allowed_statuses(["Open"]);
    let validator = Validator::new(config).expect("valid config");
    let record = order(0, "A1")
        .with(Field::Currency, "USD")
        .with(Field::ShipCountry, "US")
        .with(Field::OrderDate, "2022-04-30")
        .with(Field::Status, "Open");
    let outcome = validator.validate_records(&[record]);
    assert_eq!(outcome.report.verdict, Verdict::Pass);
}

#[test]
fn records_sharing_an_index_are_judged_separately() {
    let records = vec![
        order(0, "A1"),
        order(0, "A2").with(Field::Amount, "-5"),
    ];
    let outcome = Validator::default().validate_records(&records);

    assert_eq!(outcome.valid_records.len(), 1);
    assert_eq!(outcome.valid_records[0].get(Field::OrderId), Some("A1"));
    assert_eq!(outcome.invalid_records.len(), 1);
    assert_eq!(outcome.invalid_records[0].get(Field::OrderId), Some("A2"));
    assert_eq!(outcome.invalid_records[0].index, 1);
    assert_eq!(outcome.report.reasons_for(0), Vec::<String>::new());
}

