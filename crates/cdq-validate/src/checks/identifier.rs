//! customer_id: positive integer, unique across the dataset.

use std::collections::HashMap;

use cdq_model::{Dataset, FailureReason, Field};

/// Occurrence counts of every (trimmed) customer_id in a dataset.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl IdIndex {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut index = Self::default();
        for id in dataset.column(Field::CustomerId) {
            let id = id.trim();
            let count = index.counts.entry(id.to_string()).or_insert(0);
            if *count == 0 {
                index.order.push(id.to_string());
            }
            *count += 1;
        }
        index
    }

    pub fn occurrences(&self, id: &str) -> usize {
        self.counts.get(id.trim()).copied().unwrap_or(0)
    }

    /// Non-empty ids seen more than once, in first-appearance order.
    pub fn duplicates(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| !id.is_empty() && self.counts[id.as_str()] > 1)
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct non-empty ids.
    pub fn distinct(&self) -> usize {
        self.order.iter().filter(|id| !id.is_empty()).count()
    }
}

/// Splits an optionally signed run of ASCII digits into (negative, digits).
///
/// Width is unbounded, so ids longer than any machine integer still count.
pub fn integer_digits(value: &str) -> Option<(bool, &str)> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some((negative, digits))
}

pub fn check(value: &str, ids: &IdIndex) -> Result<(), FailureReason> {
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    let Some((negative, digits)) = integer_digits(value) else {
        return Err(FailureReason::NotInteger {
            value: value.to_string(),
        });
    };
    if negative || digits.bytes().all(|b| b == b'0') {
        return Err(FailureReason::NotPositive {
            value: value.to_string(),
        });
    }
    let occurrences = ids.occurrences(value);
    if occurrences > 1 {
        return Err(FailureReason::DuplicateId {
            value: value.to_string(),
            occurrences,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdq_model::Record;

    fn ids(values: &[&str]) -> IdIndex {
        let dataset: Dataset = values
            .iter()
            .map(|id| Record {
                customer_id: (*id).to_string(),
                ..Record::default()
            })
            .collect();
        IdIndex::from_dataset(&dataset)
    }

    #[test]
    fn test_duplicates_are_counted_across_rows() {
        let index = ids(&["1", "2", " 2", "3"]);
        assert_eq!(index.occurrences("2"), 2);
        assert_eq!(index.duplicates(), vec!["2"]);
        assert_eq!(index.distinct(), 3);
        assert!(matches!(
            check("2", &index),
            Err(FailureReason::DuplicateId { occurrences: 2, .. })
        ));
        assert!(check("1", &index).is_ok());
    }

    #[test]
    fn test_shape_failures() {
        let index = ids(&[]);
        assert_eq!(check("", &index), Err(FailureReason::Empty));
        assert!(matches!(check("abc", &index), Err(FailureReason::NotInteger { .. })));
        assert!(matches!(check("1.5", &index), Err(FailureReason::NotInteger { .. })));
        assert!(matches!(check("-", &index), Err(FailureReason::NotInteger { .. })));
        assert_eq!(
            check("0", &index),
            Err(FailureReason::NotPositive {
                value: "0".to_string()
            })
        );
        assert_eq!(
            check("-4", &index),
            Err(FailureReason::NotPositive {
                value: "-4".to_string()
            })
        );
        assert!(matches!(
            check("-99999999999999999999999", &index),
            Err(FailureReason::NotPositive { .. })
        ));
    }

    #[test]
    fn test_ids_wider_than_i64_are_integers() {
        let long = "1234567890123456789012345";
        assert!(check(long, &ids(&[long, "2"])).is_ok());
        assert!(check("+42", &ids(&["+42"])).is_ok());
        assert!(matches!(
            check(long, &ids(&[long, long])),
            Err(FailureReason::DuplicateId { occurrences: 2, .. })
        ));
    }
}
