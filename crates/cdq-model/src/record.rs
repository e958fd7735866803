//! Fixed-schema customer records and the ordered dataset that holds them.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::Field;

/// One customer row. Every value is opaque text; an empty string is a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub address: String,
    pub income: String,
    pub account_status: String,
    pub created_date: String,
}

impl Record {
    /// Build a record from values in [`Field::ALL`] order.
    pub fn from_values<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.len() != Field::ALL.len() {
            return Err(ModelError::RowWidth {
                expected: Field::ALL.len(),
                found: values.len(),
            });
        }
        let mut record = Record::default();
        for (field, value) in Field::ALL.into_iter().zip(values) {
            record.set(field, value);
        }
        Ok(record)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::CustomerId => &self.customer_id,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Address => &self.address,
            Field::Income => &self.income,
            Field::AccountStatus => &self.account_status,
            Field::CreatedDate => &self.created_date,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::CustomerId => &mut self.customer_id,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Address => &mut self.address,
            Field::Income => &mut self.income,
            Field::AccountStatus => &mut self.account_status,
            Field::CreatedDate => &mut self.created_date,
        }
    }

    /// Replace a value and return the previous one.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> String {
        std::mem::replace(self.slot_mut(field), value.into())
    }

    /// True when the value is empty after trimming.
    pub fn is_missing(&self, field: Field) -> bool {
        is_missing(self.get(field))
    }

    /// Values in [`Field::ALL`] order.
    pub fn values(&self) -> [&str; 10] {
        Field::ALL.map(|field| self.get(field))
    }
}

/// A value counts as missing when it is empty after trimming.
pub fn is_missing(value: &str) -> bool {
    value.trim().is_empty()
}

/// Ordered customer rows. Row `n` (1-indexed) is `records[n - 1]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate rows with their 1-indexed row numbers.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records.iter().enumerate().map(|(idx, r)| (idx + 1, r))
    }

    /// Look up a row by its 1-indexed row number.
    pub fn row(&self, row: usize) -> Option<&Record> {
        row.checked_sub(1).and_then(|idx| self.records.get(idx))
    }

    /// All values of one column in row order.
    pub fn column(&self, field: Field) -> impl Iterator<Item = &str> {
        self.records.iter().map(move |r| r.get(field))
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_returns_previous_value() {
        let mut record = Record::default();
        assert_eq!(record.set(Field::Email, "a@b.co"), "");
        assert_eq!(record.set(Field::Email, "c@d.co"), "a@b.co");
        assert_eq!(record.get(Field::Email), "c@d.co");
    }

    #[test]
    fn from_values_rejects_wrong_width() {
        let err = Record::from_values(["1", "Ann"]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::RowWidth {
                expected: 10,
                found: 2
            }
        ));
    }

    #[test]
    fn rows_are_one_indexed() {
        let dataset: Dataset = (0..3)
            .map(|n| Record {
                customer_id: n.to_string(),
                ..Record::default()
            })
            .collect();
        let numbers: Vec<usize> = dataset.rows().map(|(row, _)| row).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(dataset.row(1).map(|r| r.customer_id.as_str()), Some("0"));
        assert!(dataset.row(0).is_none());
        assert!(dataset.row(4).is_none());
    }
}
