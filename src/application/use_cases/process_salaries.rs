use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::require_branch;
use crate::application::{BranchRepository, Clock, EmployeeRepository, SalaryRepository};
use crate::domain::{
    validate_period, DomainError, PayrollEntry, PayrollOutcome, PayrollRun, Salary, SalaryStatus,
};

/// Monthly payroll: creates one pending salary per payable employee.
pub struct ProcessSalariesUseCase {
    salary_repo: Arc<dyn SalaryRepository>,
    employee_repo: Arc<dyn EmployeeRepository>,
    branch_repo: Arc<dyn BranchRepository>,
    clock: Arc<dyn Clock>,
}

impl ProcessSalariesUseCase {
    pub fn new(
        salary_repo: Arc<dyn SalaryRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
        branch_repo: Arc<dyn BranchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            salary_repo,
            employee_repo,
            branch_repo,
            clock,
        }
    }

    /// Processes one period for a branch. Only the current month and the one
    /// before it are accepted. Running a period twice creates nothing new.
    pub async fn execute(
        &self,
        branch_id: &str,
        month: u32,
        year: i32,
    ) -> Result<PayrollRun, DomainError> {
        let period = validate_period(month, year, self.clock.today())?;
        let branch = require_branch(self.branch_repo.as_ref(), branch_id).await?;

        let existing: HashMap<String, Salary> = self
            .salary_repo
            .list_by_period(branch.id(), period.month, period.year)
            .await?
            .into_iter()
            .map(|s| (s.employee_id().to_string(), s))
            .collect();

        let mut employees = self.employee_repo.list_by_branch(branch.id()).await?;
        employees.retain(|e| e.is_payable());
        employees.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));

        let mut run = PayrollRun::new(branch.id().to_string(), period.month, period.year);
        let mut to_create = Vec::new();

        for employee in &employees {
            let entry = match existing.get(employee.id()) {
                Some(salary) => PayrollEntry {
                    employee_id: employee.id().to_string(),
                    employee_name: employee.name().to_string(),
                    outcome: match salary.status() {
                        SalaryStatus::Pending => PayrollOutcome::AlreadyPending,
                        SalaryStatus::Paid => PayrollOutcome::AlreadyPaid,
                    },
                    salary_id: Some(salary.id().to_string()),
                    amount: Some(salary.amount()),
                },
                None => match employee.payable_salary() {
                    Some(amount) => {
                        let salary = Salary::new(
                            employee.id().to_string(),
                            branch.id().to_string(),
                            period.month,
                            period.year,
                            amount,
                        );
                        let entry = PayrollEntry {
                            employee_id: employee.id().to_string(),
                            employee_name: employee.name().to_string(),
                            outcome: PayrollOutcome::Created,
                            salary_id: Some(salary.id().to_string()),
                            amount: Some(amount),
                        };
                        to_create.push(salary);
                        entry
                    }
                    None => PayrollEntry {
                        employee_id: employee.id().to_string(),
                        employee_name: employee.name().to_string(),
                        outcome: PayrollOutcome::SkippedNoSalary,
                        salary_id: None,
                        amount: None,
                    },
                },
            };
            run.record(entry);
        }

        self.salary_repo.create_batch(&to_create).await?;

        info!(
            "Payroll {} for branch {}: {} created, {} pending, {} paid, {} skipped",
            period.label(),
            branch.name(),
            run.created,
            run.already_pending,
            run.already_paid,
            run.skipped_no_salary
        );
        Ok(run)
    }

    pub async fn list(
        &self,
        branch_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Salary>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;
        self.salary_repo.list_by_period(branch_id, month, year).await
    }

    pub async fn pay(&self, salary_id: &str) -> Result<Salary, DomainError> {
        let mut salary = self
            .salary_repo
            .find_by_id(salary_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Salary not found: {}", salary_id)))?;

        if salary.is_paid() {
            return Err(DomainError::invalid_input(format!(
                "Salary {} for {} is already paid",
                salary_id,
                salary.period_label()
            )));
        }

        salary.mark_paid(self.clock.now());
        self.salary_repo.save(&salary).await?;

        info!("Paid salary {} ({})", salary.id(), salary.period_label());
        Ok(salary)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::connector::{
        FixedClock, InMemoryBranchRepository, InMemoryEmployeeRepository, InMemorySalaryRepository,
    };
    use crate::domain::{Branch, Employee};

    struct Env {
        use_case: ProcessSalariesUseCase,
        employees: Arc<InMemoryEmployeeRepository>,
        branch: Branch,
    }

    async fn setup() -> Env {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();
        let employees = Arc::new(InMemoryEmployeeRepository::new());

        Env {
            use_case: ProcessSalariesUseCase::new(
                Arc::new(InMemorySalaryRepository::new()),
                employees.clone(),
                branches,
                Arc::new(FixedClock::on(2024, 6, 15)),
            ),
            employees,
            branch,
        }
    }

    async fn hire(env: &Env, name: &str, salary: Option<i64>) -> Employee {
        let employee = Employee::new(
            env.branch.id().to_string(),
            name.to_string(),
            format!("doc-{}", name),
            salary.map(|s| Decimal::new(s, 0)),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        env.employees.save(&employee).await.unwrap();
        employee
    }

    #[tokio::test]
    async fn test_classifies_every_payable_employee() {
        let env = setup().await;
        hire(&env, "Bruno", Some(3_000)).await;
        hire(&env, "Ana", Some(2_000)).await;
        hire(&env, "Carla", None).await;
        let mut gone = hire(&env, "Dario", Some(5_000)).await;
        gone.deactivate();
        env.employees.save(&gone).await.unwrap();

        let run = env.use_case.execute(env.branch.id(), 6, 2024).await.unwrap();

        let names: Vec<&str> = run.entries.iter().map(|e| e.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
        assert_eq!(run.created, 2);
        assert_eq!(run.skipped_no_salary, 1);
        assert_eq!(run.total_created_amount, Decimal::new(5_000, 0));
        assert_eq!(run.entries[2].outcome, PayrollOutcome::SkippedNoSalary);
        assert!(run.entries[2].salary_id.is_none());
    }

    #[tokio::test]
    async fn test_second_run_is_idempotent() {
        let env = setup().await;
        hire(&env, "Ana", Some(2_000)).await;
        hire(&env, "Bruno", Some(3_000)).await;

        let first = env.use_case.execute(env.branch.id(), 5, 2024).await.unwrap();
        let bruno_salary = first.entries[1].salary_id.clone().unwrap();
        env.use_case.pay(&bruno_salary).await.unwrap();

        let second = env.use_case.execute(env.branch.id(), 5, 2024).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.already_pending, 1);
        assert_eq!(second.already_paid, 1);
        assert_eq!(second.entries[1].salary_id.as_deref(), Some(bruno_salary.as_str()));

        let salaries = env.use_case.list(env.branch.id(), 5, 2024).await.unwrap();
        assert_eq!(salaries.len(), 2);
    }

    #[tokio::test]
    async fn test_salary_change_does_not_touch_existing_rows() {
        let env = setup().await;
        let mut ana = hire(&env, "Ana", Some(2_000)).await;
        env.use_case.execute(env.branch.id(), 6, 2024).await.unwrap();

        ana.set_monthly_salary(Some(Decimal::new(9_999, 0)));
        env.employees.save(&ana).await.unwrap();

        let run = env.use_case.execute(env.branch.id(), 6, 2024).await.unwrap();
        assert_eq!(run.entries[0].outcome, PayrollOutcome::AlreadyPending);
        assert_eq!(run.entries[0].amount, Some(Decimal::new(2_000, 0)));
    }

    #[tokio::test]
    async fn test_period_outside_window_rejected() {
        let env = setup().await;

        let err = env
            .use_case
            .execute(env.branch.id(), 4, 2024)
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(env
            .use_case
            .execute("nope", 6, 2024)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_pay_twice_rejected() {
        let env = setup().await;
        hire(&env, "Ana", Some(2_000)).await;
        let run = env.use_case.execute(env.branch.id(), 6, 2024).await.unwrap();
        let id = run.entries[0].salary_id.clone().unwrap();

        let paid = env.use_case.pay(&id).await.unwrap();
        assert!(paid.is_paid());
        assert!(env.use_case.pay(&id).await.unwrap_err().is_invalid_input());
        assert!(env.use_case.pay("nope").await.unwrap_err().is_not_found());
    }
}
