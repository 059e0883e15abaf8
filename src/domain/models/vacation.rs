use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VacationStatus {
    #[default]
    Scheduled,
    Cancelled,
}

impl VacationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationStatus::Scheduled => "scheduled",
            VacationStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for VacationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(VacationStatus::Scheduled),
            "cancelled" | "canceled" => Ok(VacationStatus::Cancelled),
            other => Err(DomainError::invalid_input(format!(
                "Unknown vacation status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacation {
    id: String,
    employee_id: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    status: VacationStatus,
    created_at: i64,
}

impl Vacation {
    pub fn new(employee_id: String, starts_on: NaiveDate, ends_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id,
            starts_on,
            ends_on,
            status: VacationStatus::Scheduled,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        id: String,
        employee_id: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        status: VacationStatus,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            employee_id,
            starts_on,
            ends_on,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    pub fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    pub fn status(&self) -> VacationStatus {
        self.status
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == VacationStatus::Scheduled
    }

    /// Inclusive number of calendar days.
    pub fn days(&self) -> i64 {
        vacation_days(self.starts_on, self.ends_on)
    }

    pub fn overlaps(&self, starts_on: NaiveDate, ends_on: NaiveDate) -> bool {
        self.starts_on <= ends_on && starts_on <= self.ends_on
    }

    pub fn cancel(&mut self) {
        self.status = VacationStatus::Cancelled;
    }
}

pub fn vacation_days(starts_on: NaiveDate, ends_on: NaiveDate) -> i64 {
    (ends_on - starts_on).num_days() + 1
}
