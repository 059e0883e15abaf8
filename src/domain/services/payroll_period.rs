use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A payroll month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollPeriod {
    pub year: i32,
    pub month: u32,
}

impl PayrollPeriod {
    pub fn new(month: u32, year: i32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid_input(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

/// Accepts only the current month or the one before it, relative to `today`.
pub fn validate_period(
    month: u32,
    year: i32,
    today: NaiveDate,
) -> Result<PayrollPeriod, DomainError> {
    let requested = PayrollPeriod::new(month, year)?;
    let current = PayrollPeriod::containing(today);
    let previous = current.previous();

    if requested == current || requested == previous {
        Ok(requested)
    } else {
        Err(DomainError::invalid_input(format!(
            "Payroll can only be processed for {} or {}, got {}",
            previous.label(),
            current.label(),
            requested.label()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_and_previous_month_accepted() {
        let today = date(2024, 6, 15);

        assert_eq!(
            validate_period(6, 2024, today).unwrap(),
            PayrollPeriod { year: 2024, month: 6 }
        );
        assert!(validate_period(5, 2024, today).is_ok());
    }

    #[test]
    fn test_other_months_rejected() {
        let today = date(2024, 6, 15);

        assert!(validate_period(4, 2024, today).unwrap_err().is_invalid_input());
        assert!(validate_period(7, 2024, today).is_err());
        assert!(validate_period(6, 2023, today).is_err());
    }

    #[test]
    fn test_january_rolls_back_to_december() {
        let today = date(2025, 1, 3);

        assert!(validate_period(12, 2024, today).is_ok());
        assert!(validate_period(1, 2025, today).is_ok());
        assert!(validate_period(12, 2025, today).is_err());
    }

    #[test]
    fn test_month_out_of_range() {
        let today = date(2024, 6, 15);

        let err = validate_period(13, 2024, today).unwrap_err();
        assert!(err.to_string().contains("between 1 and 12"));
        assert!(validate_period(0, 2024, today).is_err());
    }
}
