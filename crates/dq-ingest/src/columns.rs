//! Source header to field mapping.
//!
//! Exports name the same column many ways (`Order ID`, `order_id`,
//! `ship-country`, `Qty`). Headers are compared after dropping everything
//! but ASCII alphanumerics and lowercasing.

use std::collections::BTreeMap;

use dq_model::Field;
use tracing::{debug, warn};

/// Reduce a header to its comparison key.
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Field the header refers to, if any.
pub fn field_for_header(header: &str) -> Option<Field> {
    let key = normalize_header(header);
    Field::ALL
        .into_iter()
        .find(|field| field.aliases().contains(&key.as_str()))
}

/// Which source column backs each field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    positions: BTreeMap<Field, usize>,
}

impl ColumnMapping {
    /// Map source headers to fields. When two headers alias the same field
    /// the first one wins.
    pub fn resolve<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut positions = BTreeMap::new();
        for (position, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            let Some(field) = field_for_header(column) else {
                debug!(column, "column not mapped to any field");
                continue;
            };
            if positions.contains_key(&field) {
                warn!(column, field = %field, "duplicate column for field, keeping the first");
                continue;
            }
            positions.insert(field, position);
        }
        Self { positions }
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.positions.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Order ID"), "orderid");
        assert_eq!(normalize_header("ship-country"), "shipcountry");
        assert_eq!(normalize_header("\u{feff}Date"), "date");
        assert_eq!(normalize_header(" order_date "), "orderdate");
    }

    #[test]
    fn test_resolve_aliases() {
        let columns = [
            "index",
            "Order ID",
            "Date",
            "Status",
            "Qty",
            "Amount",
            "currency",
            "ship-country",
        ];
        let mapping = ColumnMapping::resolve(&columns);
        assert_eq!(mapping.position(Field::OrderId), Some(1));
        assert_eq!(mapping.position(Field::OrderDate), Some(2));
        assert_eq!(mapping.position(Field::Quantity), Some(4));
        assert_eq!(mapping.position(Field::ShipCountry), Some(7));
        assert_eq!(mapping.fields().count(), 7);
    }

    #[test]
    fn test_first_alias_wins() {
        let mapping = ColumnMapping::resolve(&["date", "order_date", "qty"]);
        assert_eq!(mapping.position(Field::OrderDate), Some(0));
        assert_eq!(mapping.position(Field::Status), None);
    }
}
