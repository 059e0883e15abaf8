use async_trait::async_trait;

use crate::domain::{DomainError, Salary};

/// Persistence for payroll rows.
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    /// Inserts or replaces a single salary.
    async fn save(&self, salary: &Salary) -> Result<(), DomainError>;

    /// Inserts a batch of new salaries; either all are stored or none.
    async fn create_batch(&self, salaries: &[Salary]) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Salary>, DomainError>;

    /// Salaries of a branch for one period.
    async fn list_by_period(
        &self,
        branch_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Salary>, DomainError>;
}
