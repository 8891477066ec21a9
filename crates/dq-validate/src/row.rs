//! Field-level checks for a single record.
//!
//! Every field is checked independently; a record collects one violation per
//! failing constraint instead of stopping at the first.

use chrono::NaiveDate;
use dq_model::{Field, FieldConstraint, FieldViolation, Record, ValidationConfig};

use crate::util::{parse_integer, parse_number};

/// Check one record against every field constraint, citing `record.index`.
///
/// Violations come back in field order. Malformed values are classified as
/// violations; this function never fails.
pub fn validate_record(record: &Record, config: &ValidationConfig) -> Vec<FieldViolation> {
    check_record(record.index, record, config)
}

/// Check every record, preserving input order. Violations cite the record's
/// position in `records`.
pub fn validate_records(records: &[Record], config: &ValidationConfig) -> Vec<FieldViolation> {
    records
        .iter()
        .enumerate()
        .flat_map(|(position, record)| check_record(position, record, config))
        .collect()
}

fn check_record(row: usize, record: &Record, config: &ValidationConfig) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(record.order_id.as_deref()) {
        violations.push(FieldViolation::new(
            row,
            Field::OrderId,
            FieldConstraint::NonEmpty,
            "order_id must not be empty",
        ));
    }

    violations.extend(check_quantity(row, record.quantity.as_deref()));
    violations.extend(check_amount(row, record.amount.as_deref()));
    violations.extend(check_expected(
        row,
        Field::Currency,
        record.currency.as_deref(),
        &config.expected_currency,
    ));
    violations.extend(check_expected(
        row,
        Field::ShipCountry,
        record.ship_country.as_deref(),
        &config.expected_ship_country,
    ));
    violations.extend(check_date(
        row,
        record.order_date.as_deref(),
        &config.date_format,
    ));

    violations
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_quantity(row: usize, value: Option<&str>) -> Option<FieldViolation> {
    let Some(raw) = value else {
        return Some(FieldViolation::new(
            row,
            Field::Quantity,
            FieldConstraint::Integer,
            "quantity is missing",
        ));
    };
    match parse_integer(raw) {
        None => Some(FieldViolation::new(
            row,
            Field::Quantity,
            FieldConstraint::Integer,
            format!("quantity '{}' is not an integer", raw.trim()),
        )),
        Some(qty) if qty < 0 => Some(FieldViolation::new(
            row,
            Field::Quantity,
            FieldConstraint::NonNegative,
            format!("quantity must be >= 0, got {qty}"),
        )),
        Some(_) => None,
    }
}

fn check_amount(row: usize, value: Option<&str>) -> Option<FieldViolation> {
    let Some(raw) = value else {
        return Some(FieldViolation::new(
            row,
            Field::Amount,
            FieldConstraint::Number,
            "amount is missing",
        ));
    };
    match parse_number(raw) {
        None => Some(FieldViolation::new(
            row,
            Field::Amount,
            FieldConstraint::Number,
            format!("amount '{}' is not a number", raw.trim()),
        )),
        Some(amount) if amount < 0.0 => Some(FieldViolation::new(
            row,
            Field::Amount,
            FieldConstraint::NonNegative,
            format!("amount must be >= 0, got {}", raw.trim()),
        )),
        Some(_) => None,
    }
}

fn check_expected(
    row: usize,
    field: Field,
    value: Option<&str>,
    expected: &str,
) -> Option<FieldViolation> {
    match value {
        Some(actual) if actual == expected => None,
        Some(actual) => Some(FieldViolation::new(
            row,
            field,
            FieldConstraint::ExpectedValue,
            format!("{field} must be {expected}, got '{actual}'"),
        )),
        None => Some(FieldViolation::new(
            row,
            field,
            FieldConstraint::ExpectedValue,
            format!("{field} is missing, expected {expected}"),
        )),
    }
}

fn check_date(row: usize, value: Option<&str>, format: &str) -> Option<FieldViolation> {
    let Some(raw) = value else {
        return Some(FieldViolation::new(
            row,
            Field::OrderDate,
            FieldConstraint::DateFormat,
            "order_date is missing",
        ));
    };
    if NaiveDate::parse_from_str(raw.trim(), format).is_ok() {
        return None;
    }
    Some(FieldViolation::new(
        row,
        Field::OrderDate,
        FieldConstraint::DateFormat,
        format!("order_date '{raw}' does not match format {format}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record(index: usize) -> Record {
        Record::new(index)
            .with(Field::OrderId, format!("ORD-{index}"))
            .with(Field::Quantity, "2")
            .with(Field::Amount, "499.50")
            .with(Field::Currency, "INR")
            .with(Field::ShipCountry, "IN")
            .with(Field::OrderDate, "04-30-22")
            .with(Field::Status, "Shipped")
    }

    fn fields(violations: &[FieldViolation]) -> Vec<(Field, FieldConstraint)> {
        violations.iter().map(|v| (v.field, v.constraint)).collect()
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        let config = ValidationConfig::default();
        assert!(validate_record(&valid_record(0), &config).is_empty());
    }

    #[test]
    fn test_negative_quantity_single_violation() {
        let config = ValidationConfig::default();
        let record = valid_record(0).with(Field::Quantity, "-1");
        let violations = validate_record(&record, &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, Field::Quantity);
        assert_eq!(violations[0].constraint, FieldConstraint::NonNegative);
        assert_eq!(violations[0].reason, "quantity must be >= 0, got -1");
    }

    #[test]
    fn test_negative_amount() {
        let config = ValidationConfig::default();
        let record = valid_record(7).with(Field::Amount, "-5");
        let violations = validate_record(&record, &config);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].row, 7);
        assert_eq!(violations[0].field, Field::Amount);
        assert_eq!(violations[0].constraint, FieldConstraint::NonNegative);
    }

    #[test]
    fn test_malformed_numbers_are_classified() {
        let config = ValidationConfig::default();
        let record = valid_record(0)
            .with(Field::Quantity, "two")
            .with(Field::Amount, "NaN");
        let violations = validate_record(&record, &config);
        assert_eq!(
            fields(&violations),
            vec![
                (Field::Quantity, FieldConstraint::Integer),
                (Field::Amount, FieldConstraint::Number),
            ]
        );
    }

    #[test]
    fn test_fractional_quantity_rejected_but_whole_float_accepted() {
        let config = ValidationConfig::default();
        let whole = valid_record(0).with(Field::Quantity, "3.0");
        assert!(validate_record(&whole, &config).is_empty());

        let fractional = valid_record(0).with(Field::Quantity, "1.5");
        assert_eq!(
            fields(&validate_record(&fractional, &config)),
            vec![(Field::Quantity, FieldConstraint::Integer)]
        );
    }

    #[test]
    fn test_invalid_date() {
        let config = ValidationConfig::default();
        let record = valid_record(0).with(Field::OrderDate, "13-40-99");
        let violations = validate_record(&record, &config);
        assert_eq!(
            fields(&violations),
            vec![(Field::OrderDate, FieldConstraint::DateFormat)]
        );
    }

    #[test]
    fn test_four_digit_year_does_not_match_two_digit_format() {
        let config = ValidationConfig::default();
        let record = valid_record(0).with(Field::OrderDate, "04-30-2022");
        assert_eq!(validate_record(&record, &config).len(), 1);

        let config = config.with_date_format("%m-%d-%Y");
        assert!(validate_record(&record, &config).is_empty());
    }

    #[test]
    fn test_all_violations_accumulate() {
        let config = ValidationConfig::default();
        let record = Record::new(2)
            .with(Field::OrderId, "  ")
            .with(Field::Quantity, "-3")
            .with(Field::Amount, "-1.25")
            .with(Field::Currency, "USD")
            .with(Field::ShipCountry, "US")
            .with(Field::OrderDate, "yesterday");
        let violations = validate_record(&record, &config);
        assert_eq!(
            fields(&violations),
            vec![
                (Field::OrderId, FieldConstraint::NonEmpty),
                (Field::Quantity, FieldConstraint::NonNegative),
                (Field::Amount, FieldConstraint::NonNegative),
                (Field::Currency, FieldConstraint::ExpectedValue),
                (Field::ShipCountry, FieldConstraint::ExpectedValue),
                (Field::OrderDate, FieldConstraint::DateFormat),
            ]
        );
        assert!(violations.iter().all(|v| v.row == 2));
        assert_eq!(violations[3].reason, "currency must be INR, got 'USD'");
    }

    #[test]
    fn test_missing_fields() {
        let config = ValidationConfig::default();
        let violations = validate_record(&Record::new(0), &config);
        assert_eq!(violations.len(), 6);
        assert_eq!(violations[0].constraint, FieldConstraint::NonEmpty);
        assert_eq!(violations[3].reason, "currency is missing, expected INR");
    }

    #[test]
    fn test_configured_expectations() {
        let config = ValidationConfig::default()
            .with_currency("USD")
            .with_ship_country("US");
        let record = valid_record(0)
            .with(Field::Currency, "USD")
            .with(Field::ShipCountry, "US");
        assert!(validate_record(&record, &config).is_empty());
    }

    #[test]
    fn test_validate_records_cites_positions() {
        let records = vec![valid_record(5), valid_record(5).with(Field::Amount, "-5")];
        let violations = validate_records(&records, &ValidationConfig::default());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].row, 1);
    }
}
