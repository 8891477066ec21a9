//! The seven attributes of an order record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One attribute of an order [`Record`](crate::Record).
///
/// Variants are declared in column order; `Ord` follows that order so
/// violations sort the same way the fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OrderId,
    Quantity,
    Amount,
    Currency,
    ShipCountry,
    OrderDate,
    Status,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 7] = [
        Field::OrderId,
        Field::Quantity,
        Field::Amount,
        Field::Currency,
        Field::ShipCountry,
        Field::OrderDate,
        Field::Status,
    ];

    /// Canonical snake_case column name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::OrderId => "order_id",
            Self::Quantity => "quantity",
            Self::Amount => "amount",
            Self::Currency => "currency",
            Self::ShipCountry => "ship_country",
            Self::OrderDate => "order_date",
            Self::Status => "status",
        }
    }

    /// Header spellings accepted for this field, in normalized form
    /// (lowercase ASCII alphanumerics only).
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::OrderId => &["orderid"],
            Self::Quantity => &["quantity", "qty"],
            Self::Amount => &["amount"],
            Self::Currency => &["currency"],
            Self::ShipCountry => &["shipcountry"],
            Self::OrderDate => &["orderdate", "date"],
            Self::Status => &["status"],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s.trim())
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}
