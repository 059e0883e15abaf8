use async_trait::async_trait;

use crate::domain::{DomainError, Vacation};

#[async_trait]
pub trait VacationRepository: Send + Sync {
    /// Inserts or replaces the vacation.
    async fn save(&self, vacation: &Vacation) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Vacation>, DomainError>;

    /// All vacations of an employee ordered by start date.
    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<Vacation>, DomainError>;
}
