use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::require_employee;
use crate::application::{EmployeeRepository, VacationRepository};
use crate::domain::{vacation_days, DomainError, Vacation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVacation {
    pub employee_id: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

pub struct ManageVacationsUseCase {
    vacation_repo: Arc<dyn VacationRepository>,
    employee_repo: Arc<dyn EmployeeRepository>,
    max_days: i64,
}

impl ManageVacationsUseCase {
    pub fn new(
        vacation_repo: Arc<dyn VacationRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
        max_days: i64,
    ) -> Self {
        Self {
            vacation_repo,
            employee_repo,
            max_days,
        }
    }

    pub async fn request(&self, input: NewVacation) -> Result<Vacation, DomainError> {
        if input.starts_on > input.ends_on {
            return Err(DomainError::invalid_input(
                "Vacation must not end before it starts",
            ));
        }
        let days = vacation_days(input.starts_on, input.ends_on);
        if days > self.max_days {
            return Err(DomainError::invalid_input(format!(
                "Vacation of {} days exceeds the limit of {} days",
                days, self.max_days
            )));
        }

        let employee = require_employee(self.employee_repo.as_ref(), &input.employee_id).await?;
        if !employee.is_payable() {
            return Err(DomainError::invalid_input(format!(
                "Employee {} is not active",
                employee.id()
            )));
        }

        let existing = self.vacation_repo.list_by_employee(employee.id()).await?;
        if let Some(clash) = existing
            .iter()
            .find(|v| v.is_scheduled() && v.overlaps(input.starts_on, input.ends_on))
        {
            return Err(DomainError::already_exists(format!(
                "Overlaps vacation {} ({} to {})",
                clash.id(),
                clash.starts_on(),
                clash.ends_on()
            )));
        }

        let vacation = Vacation::new(employee.id().to_string(), input.starts_on, input.ends_on);
        self.vacation_repo.save(&vacation).await?;

        info!(
            "Scheduled {} vacation days for employee {}",
            vacation.days(),
            employee.id()
        );
        Ok(vacation)
    }

    pub async fn list(&self, employee_id: &str) -> Result<Vec<Vacation>, DomainError> {
        require_employee(self.employee_repo.as_ref(), employee_id).await?;
        self.vacation_repo.list_by_employee(employee_id).await
    }

    pub async fn cancel(&self, id: &str) -> Result<Vacation, DomainError> {
        let mut vacation = self
            .vacation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Vacation not found: {}", id)))?;

        if !vacation.is_scheduled() {
            return Err(DomainError::invalid_input(format!(
                "Vacation {} is already cancelled",
                id
            )));
        }

        vacation.cancel();
        self.vacation_repo.save(&vacation).await?;

        info!("Cancelled vacation {}", vacation.id());
        Ok(vacation)
    }
}
