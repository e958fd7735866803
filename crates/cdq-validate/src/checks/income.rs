//! income: a real number between 0 and the cap, inclusive.

use cdq_model::FailureReason;

use crate::rule_set::INCOME_CAP;

pub fn check(value: &str) -> Result<(), FailureReason> {
    if value.is_empty() {
        return Err(FailureReason::Empty);
    }
    let amount = match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => {
            return Err(FailureReason::NotNumeric {
                value: value.to_string(),
            });
        }
    };
    if amount < 0.0 {
        return Err(FailureReason::Negative { value: amount });
    }
    if amount > INCOME_CAP {
        return Err(FailureReason::AboveCap {
            value: amount,
            cap: INCOME_CAP,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_bounds() {
        assert!(check("0").is_ok());
        assert!(check("52000.50").is_ok());
        assert!(check("10000000").is_ok());
        assert!(matches!(check("10000000.01"), Err(FailureReason::AboveCap { .. })));
        assert_eq!(check("-5"), Err(FailureReason::Negative { value: -5.0 }));
        assert!(matches!(check("lots"), Err(FailureReason::NotNumeric { .. })));
        assert!(matches!(check("NaN"), Err(FailureReason::NotNumeric { .. })));
        assert_eq!(check(""), Err(FailureReason::Empty));
    }
}
