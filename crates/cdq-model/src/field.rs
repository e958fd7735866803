//! Column identifiers and sentinel literals for the customer table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Placeholder written into text columns that were empty and cannot be dropped.
pub const UNKNOWN_PLACEHOLDER: &str = "[UNKNOWN]";

/// Sentinel for a date value that matched none of the accepted source formats.
pub const INVALID_DATE: &str = "[INVALID_DATE]";

/// Replacement written over every real address in the masked table.
pub const MASKED_ADDRESS: &str = "[MASKED ADDRESS]";

/// Fill value for a missing account status.
pub const STATUS_UNKNOWN: &str = "unknown";

/// One column of the customer table.
///
/// The declaration order is the on-disk column order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerId,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    Income,
    AccountStatus,
    CreatedDate,
}

impl Field {
    /// All columns in on-disk order.
    pub const ALL: [Field; 10] = [
        Field::CustomerId,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::DateOfBirth,
        Field::Address,
        Field::Income,
        Field::AccountStatus,
        Field::CreatedDate,
    ];

    /// Header name used in the delimited file.
    pub fn column_name(self) -> &'static str {
        match self {
            Field::CustomerId => "customer_id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::DateOfBirth => "date_of_birth",
            Field::Address => "address",
            Field::Income => "income",
            Field::AccountStatus => "account_status",
            Field::CreatedDate => "created_date",
        }
    }

    /// Look up a column by header name (exact match after trimming).
    pub fn from_column(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.column_name() == trimmed)
    }

    /// Position of the column in [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::DateOfBirth | Field::CreatedDate)
    }

    pub fn is_name(self) -> bool {
        matches!(self, Field::FirstName | Field::LastName)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl std::str::FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s).ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}
