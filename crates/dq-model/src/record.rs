//! Order records and the table that carries them into the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::field::Field;

/// One order transaction.
///
/// Every attribute is raw text; `None` marks a structurally null cell.
/// `index` is the record's position in the input and serves as its identity
/// in every violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub index: usize,
    pub order_id: Option<String>,
    pub quantity: Option<String>,
    pub amount: Option<String>,
    pub currency: Option<String>,
    pub ship_country: Option<String>,
    pub order_date: Option<String>,
    pub status: Option<String>,
    /// Source cells in source column order, used to reproduce the row on output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<String>,
}

impl Record {
    /// Create an empty record at the given input position.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Builder-style setter for one field.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Attach the source cells for this row.
    #[must_use]
    pub fn with_source(mut self, source: Vec<String>) -> Self {
        self.source = source;
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::OrderId => self.order_id.as_deref(),
            Field::Quantity => self.quantity.as_deref(),
            Field::Amount => self.amount.as_deref(),
            Field::Currency => self.currency.as_deref(),
            Field::ShipCountry => self.ship_country.as_deref(),
            Field::OrderDate => self.order_date.as_deref(),
            Field::Status => self.status.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        let slot = match field {
            Field::OrderId => &mut self.order_id,
            Field::Quantity => &mut self.quantity,
            Field::Amount => &mut self.amount,
            Field::Currency => &mut self.currency,
            Field::ShipCountry => &mut self.ship_country,
            Field::OrderDate => &mut self.order_date,
            Field::Status => &mut self.status,
        };
        *slot = value;
    }
}

/// An ordered collection of records plus the schema they were loaded with.
#[derive(Debug, Clone, Default)]
pub struct OrderTable {
    /// Source header, in file order.
    pub columns: Vec<String>,
    /// Fields backed by a column (or filled by a loader default).
    pub fields: BTreeSet<Field>,
    pub records: Vec<Record>,
}

impl OrderTable {
    pub fn new(columns: Vec<String>, fields: BTreeSet<Field>, records: Vec<Record>) -> Self {
        Self {
            columns,
            fields,
            records,
        }
    }

    /// A table where every field is present, for callers that build records
    /// in memory.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            columns: Field::ALL.iter().map(|f| f.name().to_string()).collect(),
            fields: Field::ALL.into_iter().collect(),
            records,
        }
    }

    /// Fields with no backing column, in column order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !self.fields.contains(field))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_get() {
        let record = Record::new(3)
            .with(Field::OrderId, "A1")
            .with(Field::Status, "Shipped");
        assert_eq!(record.index, 3);
        assert_eq!(record.get(Field::OrderId), Some("A1"));
        assert_eq!(record.get(Field::Status), Some("Shipped"));
        assert_eq!(record.get(Field::Amount), None);
    }

    #[test]
    fn test_missing_fields() {
        let fields = [Field::OrderId, Field::Quantity, Field::Amount]
            .into_iter()
            .collect();
        let table = OrderTable::new(Vec::new(), fields, Vec::new());
        assert_eq!(
            table.missing_fields(),
            vec![
                Field::Currency,
                Field::ShipCountry,
                Field::OrderDate,
                Field::Status
            ]
        );
        assert!(OrderTable::from_records(Vec::new()).missing_fields().is_empty());
    }
}
