use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::require_branch;
use crate::application::{AccountReceivableRepository, BranchRepository, Clock};
use crate::domain::{AccountReceivable, DomainError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReceivable {
    pub branch_id: String,
    pub description: String,
    pub amount: Decimal,
    pub due_on: NaiveDate,
}

pub struct ManageReceivablesUseCase {
    receivable_repo: Arc<dyn AccountReceivableRepository>,
    branch_repo: Arc<dyn BranchRepository>,
    clock: Arc<dyn Clock>,
}

impl ManageReceivablesUseCase {
    pub fn new(
        receivable_repo: Arc<dyn AccountReceivableRepository>,
        branch_repo: Arc<dyn BranchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            receivable_repo,
            branch_repo,
            clock,
        }
    }

    pub async fn create(&self, input: NewReceivable) -> Result<AccountReceivable, DomainError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(DomainError::invalid_input("Description must not be empty"));
        }
        if input.amount <= Decimal::ZERO {
            return Err(DomainError::invalid_input(
                "Amount must be greater than zero",
            ));
        }

        require_branch(self.branch_repo.as_ref(), &input.branch_id).await?;

        let receivable = AccountReceivable::new(
            input.branch_id,
            description.to_string(),
            input.amount,
            input.due_on,
        );
        self.receivable_repo.save(&receivable).await?;

        info!(
            "Recorded receivable {} of {}",
            receivable.id(),
            receivable.amount()
        );
        Ok(receivable)
    }

    pub async fn list(&self, branch_id: &str) -> Result<Vec<AccountReceivable>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;
        self.receivable_repo.list_by_branch(branch_id).await
    }

    pub async fn receive(&self, id: &str) -> Result<AccountReceivable, DomainError> {
        let mut receivable = self.receivable_repo.find_by_id(id).await?.ok_or_else(|| {
            DomainError::not_found(format!("Account receivable not found: {}", id))
        })?;
        if receivable.is_received() {
            return Err(DomainError::invalid_input(format!(
                "Account receivable {} was already received",
                id
            )));
        }

        receivable.mark_received(self.clock.now());
        self.receivable_repo.save(&receivable).await?;

        info!("Received account receivable {}", receivable.id());
        Ok(receivable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{
        FixedClock, InMemoryAccountReceivableRepository, InMemoryBranchRepository,
    };
    use crate::domain::Branch;

    #[tokio::test]
    async fn test_receive_once() {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();
        let use_case = ManageReceivablesUseCase::new(
            Arc::new(InMemoryAccountReceivableRepository::new()),
            branches,
            Arc::new(FixedClock::on(2024, 6, 15)),
        );

        let receivable = use_case
            .create(NewReceivable {
                branch_id: branch.id().to_string(),
                description: "Freight contract".to_string(),
                amount: Decimal::new(9_900, 2),
                due_on: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            })
            .await
            .unwrap();

        let received = use_case.receive(receivable.id()).await.unwrap();
        assert!(received.is_received());
        assert!(use_case
            .receive(receivable.id())
            .await
            .unwrap_err()
            .is_invalid_input());

        let listed = use_case.list(branch.id()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_received());
    }
}
