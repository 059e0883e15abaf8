use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::{NewPayable, NewReceivable};
use crate::cli::OutputFormat;
use crate::domain::{AccountPayable, AccountReceivable, PayableStatus};

use super::super::Container;

/// Accounts payable and receivable.
pub struct FinanceController<'a> {
    container: &'a Container,
}

impl<'a> FinanceController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add_payable(
        &self,
        branch_id: String,
        description: String,
        amount: Decimal,
        due_on: NaiveDate,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewPayable {
            branch_id,
            description,
            amount,
            due_on,
        };
        let payable = self.container.payables_use_case().create(input).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&payable)?,
            OutputFormat::Text => format!("Created payable {}", self.describe_payable(&payable)),
        })
    }

    pub async fn list_payables(
        &self,
        branch_id: String,
        status: Option<PayableStatus>,
        format: OutputFormat,
    ) -> Result<String> {
        let payables = self
            .container
            .payables_use_case()
            .list(&branch_id, status)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&payables)?,
            OutputFormat::Text => {
                if payables.is_empty() {
                    return Ok("No accounts payable.".to_string());
                }
                payables
                    .iter()
                    .map(|p| format!("  {}\n", self.describe_payable(p)))
                    .collect()
            }
        })
    }

    pub async fn pay(&self, payable_id: String) -> Result<String> {
        let payable = self.container.payables_use_case().pay(&payable_id).await?;
        Ok(format!("Paid {}", self.describe_payable(&payable)))
    }

    pub async fn add_receivable(
        &self,
        branch_id: String,
        description: String,
        amount: Decimal,
        due_on: NaiveDate,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewReceivable {
            branch_id,
            description,
            amount,
            due_on,
        };
        let receivable = self.container.receivables_use_case().create(input).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&receivable)?,
            OutputFormat::Text => {
                format!("Created receivable {}", describe_receivable(&receivable))
            }
        })
    }

    pub async fn list_receivables(
        &self,
        branch_id: String,
        format: OutputFormat,
    ) -> Result<String> {
        let receivables = self.container.receivables_use_case().list(&branch_id).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&receivables)?,
            OutputFormat::Text => {
                if receivables.is_empty() {
                    return Ok("No accounts receivable.".to_string());
                }
                receivables
                    .iter()
                    .map(|r| format!("  {}\n", describe_receivable(r)))
                    .collect()
            }
        })
    }

    pub async fn receive(&self, receivable_id: String) -> Result<String> {
        let receivable = self
            .container
            .receivables_use_case()
            .receive(&receivable_id)
            .await?;
        Ok(format!("Received {}", describe_receivable(&receivable)))
    }

    fn describe_payable(&self, payable: &AccountPayable) -> String {
        let overdue = if payable.is_overdue(self.container.clock().today()) {
            " OVERDUE"
        } else {
            ""
        };
        format!(
            "{} '{}' {} due {} [{}]{}",
            payable.id(),
            payable.description(),
            payable.amount(),
            payable.due_on(),
            payable.status(),
            overdue
        )
    }
}

fn describe_receivable(receivable: &AccountReceivable) -> String {
    format!(
        "{} '{}' {} due {} [{}]",
        receivable.id(),
        receivable.description(),
        receivable.amount(),
        receivable.due_on(),
        receivable.status()
    )
}
