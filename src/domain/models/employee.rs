use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    id: String,
    branch_id: String,
    name: String,
    /// National identity document, unique within a branch.
    document: String,
    monthly_salary: Option<Decimal>,
    hired_on: NaiveDate,
    active: bool,
    created_at: i64,
    deleted_at: Option<i64>,
}

impl Employee {
    pub fn new(
        branch_id: String,
        name: String,
        document: String,
        monthly_salary: Option<Decimal>,
        hired_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            branch_id,
            name,
            document,
            monthly_salary,
            hired_on,
            active: true,
            created_at: current_timestamp(),
            deleted_at: None,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        branch_id: String,
        name: String,
        document: String,
        monthly_salary: Option<Decimal>,
        hired_on: NaiveDate,
        active: bool,
        created_at: i64,
        deleted_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            branch_id,
            name,
            document,
            monthly_salary,
            hired_on,
            active,
            created_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn monthly_salary(&self) -> Option<Decimal> {
        self.monthly_salary
    }

    pub fn hired_on(&self) -> NaiveDate {
        self.hired_on
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Active and not soft-deleted: the employee takes part in payroll runs
    /// and may request vacations.
    pub fn is_payable(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }

    /// The salary a payroll run should create, if any.
    pub fn payable_salary(&self) -> Option<Decimal> {
        self.monthly_salary.filter(|amount| amount > &Decimal::ZERO)
    }

    pub fn set_monthly_salary(&mut self, monthly_salary: Option<Decimal>) {
        self.monthly_salary = monthly_salary;
    }

    /// Leaves payroll but stays on the branch roster.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn soft_delete(&mut self, at: i64) {
        self.active = false;
        self.deleted_at = Some(at);
    }
}
