use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    #[default]
    Pending,
    Paid,
}

impl SalaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryStatus::Pending => "pending",
            SalaryStatus::Paid => "paid",
        }
    }
}

impl FromStr for SalaryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SalaryStatus::Pending),
            "paid" => Ok(SalaryStatus::Paid),
            other => Err(DomainError::invalid_input(format!(
                "Unknown salary status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payroll row for one employee and one month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salary {
    id: String,
    employee_id: String,
    branch_id: String,
    month: u32,
    year: i32,
    amount: Decimal,
    status: SalaryStatus,
    created_at: i64,
    paid_at: Option<i64>,
}

impl Salary {
    pub fn new(
        employee_id: String,
        branch_id: String,
        month: u32,
        year: i32,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id,
            branch_id,
            month,
            year,
            amount,
            status: SalaryStatus::Pending,
            created_at: current_timestamp(),
            paid_at: None,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        employee_id: String,
        branch_id: String,
        month: u32,
        year: i32,
        amount: Decimal,
        status: SalaryStatus,
        created_at: i64,
        paid_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            employee_id,
            branch_id,
            month,
            year,
            amount,
            status,
            created_at,
            paid_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn status(&self) -> SalaryStatus {
        self.status
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn paid_at(&self) -> Option<i64> {
        self.paid_at
    }

    pub fn is_paid(&self) -> bool {
        self.status == SalaryStatus::Paid
    }

    pub fn mark_paid(&mut self, at: i64) {
        self.status = SalaryStatus::Paid;
        self.paid_at = Some(at);
    }

    pub fn period_label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

/// How a payroll run treated one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollOutcome {
    Created,
    AlreadyPending,
    AlreadyPaid,
    SkippedNoSalary,
}

impl PayrollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollOutcome::Created => "created",
            PayrollOutcome::AlreadyPending => "already_pending",
            PayrollOutcome::AlreadyPaid => "already_paid",
            PayrollOutcome::SkippedNoSalary => "skipped_no_salary",
        }
    }
}

impl fmt::Display for PayrollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntry {
    pub employee_id: String,
    pub employee_name: String,
    pub outcome: PayrollOutcome,
    /// Present for every outcome except `skipped_no_salary`.
    pub salary_id: Option<String>,
    pub amount: Option<Decimal>,
}

/// Summary of a payroll run over one branch and period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRun {
    pub branch_id: String,
    pub month: u32,
    pub year: i32,
    pub entries: Vec<PayrollEntry>,
    pub created: usize,
    pub already_pending: usize,
    pub already_paid: usize,
    pub skipped_no_salary: usize,
    pub total_created_amount: Decimal,
}

impl PayrollRun {
    pub fn new(branch_id: String, month: u32, year: i32) -> Self {
        Self {
            branch_id,
            month,
            year,
            entries: Vec::new(),
            created: 0,
            already_pending: 0,
            already_paid: 0,
            skipped_no_salary: 0,
            total_created_amount: Decimal::ZERO,
        }
    }

    pub fn record(&mut self, entry: PayrollEntry) {
        match entry.outcome {
            PayrollOutcome::Created => {
                self.created += 1;
                if let Some(amount) = entry.amount {
                    self.total_created_amount += amount;
                }
            }
            PayrollOutcome::AlreadyPending => self.already_pending += 1,
            PayrollOutcome::AlreadyPaid => self.already_paid += 1,
            PayrollOutcome::SkippedNoSalary => self.skipped_no_salary += 1,
        }
        self.entries.push(entry);
    }
}
