use std::sync::Arc;

use tracing::info;

use crate::application::BranchRepository;
use crate::domain::{Branch, DomainError};

pub struct ManageBranchesUseCase {
    branch_repo: Arc<dyn BranchRepository>,
    company_id: String,
}

impl ManageBranchesUseCase {
    pub fn new(branch_repo: Arc<dyn BranchRepository>, company_id: impl Into<String>) -> Self {
        Self {
            branch_repo,
            company_id: company_id.into(),
        }
    }

    pub async fn create(&self, name: &str) -> Result<Branch, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_input("Branch name must not be empty"));
        }

        if self
            .branch_repo
            .find_by_name(&self.company_id, name)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists(format!(
                "Branch '{}' already exists",
                name
            )));
        }

        let branch = Branch::new(self.company_id.clone(), name.to_string());
        self.branch_repo.save(&branch).await?;

        info!("Created branch {} ({})", branch.name(), branch.id());
        Ok(branch)
    }

    pub async fn list(&self) -> Result<Vec<Branch>, DomainError> {
        self.branch_repo.list(&self.company_id).await
    }

    pub async fn get(&self, id: &str) -> Result<Branch, DomainError> {
        require_branch(self.branch_repo.as_ref(), id).await
    }
}

/// Loads a branch or fails with `NotFound`.
pub(crate) async fn require_branch(
    branch_repo: &dyn BranchRepository,
    id: &str,
) -> Result<Branch, DomainError> {
    branch_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Branch not found: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::InMemoryBranchRepository;

    fn use_case() -> ManageBranchesUseCase {
        ManageBranchesUseCase::new(Arc::new(InMemoryBranchRepository::new()), "acme")
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let use_case = use_case();

        use_case.create("South").await.expect("create");
        use_case.create("  North ").await.expect("create");

        let branches = use_case.list().await.expect("list");
        let names: Vec<&str> = branches.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["North", "South"]);
        assert!(branches.iter().all(|b| b.company_id() == "acme"));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let use_case = use_case();
        use_case.create("North").await.expect("create");

        let err = use_case.create("North").await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_empty_name_and_missing_branch() {
        let use_case = use_case();

        assert!(use_case.create("   ").await.unwrap_err().is_invalid_input());
        assert!(use_case.get("nope").await.unwrap_err().is_not_found());
    }
}
