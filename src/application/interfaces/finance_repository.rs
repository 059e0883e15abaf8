use async_trait::async_trait;

use crate::domain::{AccountPayable, AccountReceivable, DomainError, PayableStatus};

/// Persistence for accounts payable.
#[async_trait]
pub trait AccountPayableRepository: Send + Sync {
    /// Inserts or replaces the entry.
    async fn save(&self, payable: &AccountPayable) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountPayable>, DomainError>;

    /// Entries of a branch ordered by due date, optionally filtered by status.
    async fn list_by_branch(
        &self,
        branch_id: &str,
        status: Option<PayableStatus>,
    ) -> Result<Vec<AccountPayable>, DomainError>;

    /// Removes the entry; a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
}

/// Persistence for accounts receivable.
#[async_trait]
pub trait AccountReceivableRepository: Send + Sync {
    /// Inserts or replaces the entry.
    async fn save(&self, receivable: &AccountReceivable) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountReceivable>, DomainError>;

    /// Entries of a branch ordered by due date.
    async fn list_by_branch(&self, branch_id: &str)
        -> Result<Vec<AccountReceivable>, DomainError>;
}
