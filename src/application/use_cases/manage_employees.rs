use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::require_branch;
use crate::application::{BranchRepository, Clock, EmployeeRepository};
use crate::domain::{DomainError, Employee};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub branch_id: String,
    pub name: String,
    pub document: String,
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    pub hired_on: NaiveDate,
}

pub struct ManageEmployeesUseCase {
    employee_repo: Arc<dyn EmployeeRepository>,
    branch_repo: Arc<dyn BranchRepository>,
    clock: Arc<dyn Clock>,
}

impl ManageEmployeesUseCase {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        branch_repo: Arc<dyn BranchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            employee_repo,
            branch_repo,
            clock,
        }
    }

    pub async fn create(&self, input: NewEmployee) -> Result<Employee, DomainError> {
        let name = input.name.trim();
        let document = input.document.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_input("Employee name must not be empty"));
        }
        if document.is_empty() {
            return Err(DomainError::invalid_input(
                "Employee document must not be empty",
            ));
        }
        validate_salary(input.monthly_salary)?;

        require_branch(self.branch_repo.as_ref(), &input.branch_id).await?;

        if self
            .employee_repo
            .find_by_document(&input.branch_id, document)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists(format!(
                "An employee with document {} already exists in this branch",
                document
            )));
        }

        let employee = Employee::new(
            input.branch_id,
            name.to_string(),
            document.to_string(),
            input.monthly_salary,
            input.hired_on,
        );
        self.employee_repo.save(&employee).await?;

        info!("Registered employee {} ({})", employee.name(), employee.id());
        Ok(employee)
    }

    /// Employees of a branch; soft-deleted ones are never listed and
    /// inactive ones only when `include_inactive` is set.
    pub async fn list(
        &self,
        branch_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<Employee>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;

        let employees = self.employee_repo.list_by_branch(branch_id).await?;
        Ok(employees
            .into_iter()
            .filter(|e| include_inactive || e.is_active())
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Employee, DomainError> {
        require_employee(self.employee_repo.as_ref(), id).await
    }

    pub async fn set_monthly_salary(
        &self,
        id: &str,
        monthly_salary: Option<Decimal>,
    ) -> Result<Employee, DomainError> {
        validate_salary(monthly_salary)?;

        let mut employee = require_employee(self.employee_repo.as_ref(), id).await?;
        employee.set_monthly_salary(monthly_salary);
        self.employee_repo.save(&employee).await?;

        info!("Updated monthly salary of employee {}", employee.id());
        Ok(employee)
    }

    /// Takes the employee out of payroll and vacations; the record stays
    /// listed with `include_inactive`.
    pub async fn deactivate(&self, id: &str) -> Result<Employee, DomainError> {
        let mut employee = require_employee(self.employee_repo.as_ref(), id).await?;
        if !employee.is_active() {
            return Err(DomainError::invalid_input(format!(
                "Employee {} is already inactive",
                id
            )));
        }
        employee.deactivate();
        self.employee_repo.save(&employee).await?;

        info!("Deactivated employee {}", employee.id());
        Ok(employee)
    }

    /// Soft delete: the row stays referenced by past salaries.
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut employee = require_employee(self.employee_repo.as_ref(), id).await?;
        employee.soft_delete(self.clock.now());
        self.employee_repo.save(&employee).await?;

        info!("Deleted employee {}", employee.id());
        Ok(())
    }
}

fn validate_salary(monthly_salary: Option<Decimal>) -> Result<(), DomainError> {
    match monthly_salary {
        Some(amount) if amount <= Decimal::ZERO => Err(DomainError::invalid_input(
            "Monthly salary must be greater than zero",
        )),
        _ => Ok(()),
    }
}

/// Loads a non-deleted employee or fails with `NotFound`.
pub(crate) async fn require_employee(
    employee_repo: &dyn EmployeeRepository,
    id: &str,
) -> Result<Employee, DomainError> {
    employee_repo
        .find_by_id(id)
        .await?
        .filter(|e| !e.is_deleted())
        .ok_or_else(|| DomainError::not_found(format!("Employee not found: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{FixedClock, InMemoryBranchRepository, InMemoryEmployeeRepository};
    use crate::domain::Branch;

    async fn setup() -> (ManageEmployeesUseCase, Branch) {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();

        let use_case = ManageEmployeesUseCase::new(
            Arc::new(InMemoryEmployeeRepository::new()),
            branches,
            Arc::new(FixedClock::on(2024, 6, 15)),
        );
        (use_case, branch)
    }

    fn input(branch: &Branch, document: &str, salary: Option<Decimal>) -> NewEmployee {
        NewEmployee {
            branch_id: branch.id().to_string(),
            name: format!("Employee {}", document),
            document: document.to_string(),
            monthly_salary: salary,
            hired_on: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_branch() {
        let (use_case, branch) = setup().await;
        let mut new = input(&branch, "1", None);
        new.branch_id = "missing".to_string();

        assert!(use_case.create(new).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_document_rejected() {
        let (use_case, branch) = setup().await;
        use_case.create(input(&branch, "42", None)).await.unwrap();

        let err = use_case.create(input(&branch, " 42 ", None)).await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_non_positive_salary_rejected() {
        let (use_case, branch) = setup().await;

        let err = use_case
            .create(input(&branch, "1", Some(Decimal::ZERO)))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_inactive_employees_listed_on_request() {
        let (use_case, branch) = setup().await;
        let active = use_case.create(input(&branch, "6", None)).await.unwrap();
        let employee = use_case.create(input(&branch, "7", None)).await.unwrap();

        let deactivated = use_case.deactivate(employee.id()).await.unwrap();
        assert!(!deactivated.is_payable());

        let listed = use_case.list(branch.id(), false).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), active.id());

        let everyone = use_case.list(branch.id(), true).await.unwrap();
        assert_eq!(everyone.len(), 2);
        assert!(everyone.iter().any(|e| e.id() == employee.id() && !e.is_active()));

        assert!(!use_case.get(employee.id()).await.unwrap().is_active());
        assert!(use_case
            .deactivate(employee.id())
            .await
            .unwrap_err()
            .is_invalid_input());
    }

    #[tokio::test]
    async fn test_delete_hides_employee() {
        let (use_case, branch) = setup().await;
        let employee = use_case.create(input(&branch, "8", None)).await.unwrap();
        use_case.deactivate(employee.id()).await.unwrap();

        use_case.delete(employee.id()).await.unwrap();

        assert!(use_case.list(branch.id(), true).await.unwrap().is_empty());
        assert!(use_case.get(employee.id()).await.unwrap_err().is_not_found());
        assert!(use_case.delete(employee.id()).await.unwrap_err().is_not_found());
        assert!(use_case
            .deactivate(employee.id())
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_set_monthly_salary() {
        let (use_case, branch) = setup().await;
        let employee = use_case.create(input(&branch, "9", None)).await.unwrap();

        let updated = use_case
            .set_monthly_salary(employee.id(), Some(Decimal::new(3_200, 0)))
            .await
            .unwrap();
        assert_eq!(updated.monthly_salary(), Some(Decimal::new(3_200, 0)));

        let fetched = use_case.get(employee.id()).await.unwrap();
        assert_eq!(fetched.monthly_salary(), Some(Decimal::new(3_200, 0)));
    }
}
