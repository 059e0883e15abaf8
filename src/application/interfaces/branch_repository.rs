use async_trait::async_trait;

use crate::domain::{Branch, DomainError};

/// Persistence for branches.
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Inserts a new branch; branches are never renamed.
    async fn save(&self, branch: &Branch) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, DomainError>;

    async fn find_by_name(&self, company_id: &str, name: &str)
        -> Result<Option<Branch>, DomainError>;

    async fn list(&self, company_id: &str) -> Result<Vec<Branch>, DomainError>;
}
