use async_trait::async_trait;

use crate::domain::{DomainError, Employee};

/// Persistence for employees. Soft-deleted rows are returned by `find_by_id`
/// so callers can tell "gone" from "never existed".
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Inserts or replaces the employee.
    async fn save(&self, employee: &Employee) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError>;

    /// Non-deleted employee with this document in the branch.
    async fn find_by_document(
        &self,
        branch_id: &str,
        document: &str,
    ) -> Result<Option<Employee>, DomainError>;

    /// Non-deleted employees of a branch ordered by name.
    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Employee>, DomainError>;
}
