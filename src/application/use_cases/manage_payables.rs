use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::require_branch;
use crate::application::{AccountPayableRepository, BranchRepository, Clock};
use crate::domain::{AccountPayable, DomainError, PayableSource, PayableStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayable {
    pub branch_id: String,
    pub description: String,
    pub amount: Decimal,
    pub due_on: NaiveDate,
}

pub struct ManagePayablesUseCase {
    payable_repo: Arc<dyn AccountPayableRepository>,
    branch_repo: Arc<dyn BranchRepository>,
    clock: Arc<dyn Clock>,
}

impl ManagePayablesUseCase {
    pub fn new(
        payable_repo: Arc<dyn AccountPayableRepository>,
        branch_repo: Arc<dyn BranchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            payable_repo,
            branch_repo,
            clock,
        }
    }

    /// Records a manually entered bill.
    pub async fn create(&self, input: NewPayable) -> Result<AccountPayable, DomainError> {
        self.post(
            &input.branch_id,
            &input.description,
            input.amount,
            input.due_on,
            PayableSource::Manual,
        )
        .await
    }

    /// Posts an entry on behalf of another module.
    pub async fn post(
        &self,
        branch_id: &str,
        description: &str,
        amount: Decimal,
        due_on: NaiveDate,
        source: PayableSource,
    ) -> Result<AccountPayable, DomainError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(DomainError::invalid_input("Description must not be empty"));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::invalid_input(
                "Amount must be greater than zero",
            ));
        }

        require_branch(self.branch_repo.as_ref(), branch_id).await?;

        let payable = AccountPayable::new(
            branch_id.to_string(),
            description.to_string(),
            amount,
            due_on,
            source,
        );
        self.payable_repo.save(&payable).await?;

        info!(
            "Posted payable {} of {} due {} ({})",
            payable.id(),
            payable.amount(),
            payable.due_on(),
            payable.source().kind()
        );
        Ok(payable)
    }

    /// Withdraws an entry posted by another module whose own write failed.
    pub(crate) async fn discard(&self, id: &str) -> Result<(), DomainError> {
        self.payable_repo.delete(id).await?;
        warn!("Discarded account payable {}", id);
        Ok(())
    }

    pub async fn list(
        &self,
        branch_id: &str,
        status: Option<PayableStatus>,
    ) -> Result<Vec<AccountPayable>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;
        self.payable_repo.list_by_branch(branch_id, status).await
    }

    pub async fn get(&self, id: &str) -> Result<AccountPayable, DomainError> {
        self.payable_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Account payable not found: {}", id)))
    }

    pub async fn pay(&self, id: &str) -> Result<AccountPayable, DomainError> {
        let mut payable = self.get(id).await?;
        if payable.is_paid() {
            return Err(DomainError::invalid_input(format!(
                "Account payable {} is already paid",
                id
            )));
        }

        payable.mark_paid(self.clock.now());
        self.payable_repo.save(&payable).await?;

        info!("Paid account payable {}", payable.id());
        Ok(payable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connector::{FixedClock, InMemoryAccountPayableRepository, InMemoryBranchRepository};
    use crate::domain::Branch;

    async fn setup() -> (ManagePayablesUseCase, Branch) {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();

        let use_case = ManagePayablesUseCase::new(
            Arc::new(InMemoryAccountPayableRepository::new()),
            branches,
            Arc::new(FixedClock::on(2024, 6, 15)),
        );
        (use_case, branch)
    }

    fn bill(branch: &Branch, amount: Decimal, day: u32) -> NewPayable {
        NewPayable {
            branch_id: branch.id().to_string(),
            description: "Fuel".to_string(),
            amount,
            due_on: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_pay_once() {
        let (use_case, branch) = setup().await;
        let payable = use_case
            .create(bill(&branch, Decimal::new(120, 0), 20))
            .await
            .unwrap();

        let paid = use_case.pay(payable.id()).await.unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.paid_at(), Some(FixedClock::on(2024, 6, 15).now()));

        assert!(use_case.pay(payable.id()).await.unwrap_err().is_invalid_input());
        assert!(use_case.pay("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_orders_by_due_date() {
        let (use_case, branch) = setup().await;
        let late = use_case
            .create(bill(&branch, Decimal::new(10, 0), 28))
            .await
            .unwrap();
        let early = use_case
            .create(bill(&branch, Decimal::new(20, 0), 2))
            .await
            .unwrap();
        use_case.pay(late.id()).await.unwrap();

        let all = use_case.list(branch.id(), None).await.unwrap();
        assert_eq!(all[0].id(), early.id());
        assert_eq!(all.len(), 2);

        let open = use_case
            .list(branch.id(), Some(PayableStatus::Open))
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id(), early.id());
    }

    #[tokio::test]
    async fn test_amount_must_be_positive() {
        let (use_case, branch) = setup().await;

        let err = use_case
            .create(bill(&branch, Decimal::ZERO, 1))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
