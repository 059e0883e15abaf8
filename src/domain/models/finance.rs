use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;
use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PayableStatus {
    #[default]
    Open,
    Paid,
}

impl PayableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayableStatus::Open => "open",
            PayableStatus::Paid => "paid",
        }
    }
}

impl FromStr for PayableStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PayableStatus::Open),
            "paid" => Ok(PayableStatus::Paid),
            other => Err(DomainError::invalid_input(format!(
                "Unknown payable status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What produced a payable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum PayableSource {
    #[default]
    Manual,
    MaintenanceLabel(String),
}

impl PayableSource {
    pub fn kind(&self) -> &'static str {
        match self {
            PayableSource::Manual => "manual",
            PayableSource::MaintenanceLabel(_) => "maintenance_label",
        }
    }

    pub fn reference_id(&self) -> Option<&str> {
        match self {
            PayableSource::Manual => None,
            PayableSource::MaintenanceLabel(id) => Some(id),
        }
    }

    /// Rebuilds a source from its stored `kind` and reference columns.
    pub fn from_parts(kind: &str, reference_id: Option<String>) -> Result<Self, DomainError> {
        match (kind, reference_id) {
            ("manual", _) => Ok(PayableSource::Manual),
            ("maintenance_label", Some(id)) => Ok(PayableSource::MaintenanceLabel(id)),
            (other, _) => Err(DomainError::internal(format!(
                "Invalid payable source '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountPayable {
    id: String,
    branch_id: String,
    description: String,
    amount: Decimal,
    due_on: NaiveDate,
    status: PayableStatus,
    source: PayableSource,
    created_at: i64,
    paid_at: Option<i64>,
}

impl AccountPayable {
    pub fn new(
        branch_id: String,
        description: String,
        amount: Decimal,
        due_on: NaiveDate,
        source: PayableSource,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            branch_id,
            description,
            amount,
            due_on,
            status: PayableStatus::Open,
            source,
            created_at: current_timestamp(),
            paid_at: None,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        branch_id: String,
        description: String,
        amount: Decimal,
        due_on: NaiveDate,
        status: PayableStatus,
        source: PayableSource,
        created_at: i64,
        paid_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            branch_id,
            description,
            amount,
            due_on,
            status,
            source,
            created_at,
            paid_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn due_on(&self) -> NaiveDate {
        self.due_on
    }

    pub fn status(&self) -> PayableStatus {
        self.status
    }

    pub fn source(&self) -> &PayableSource {
        &self.source
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn paid_at(&self) -> Option<i64> {
        self.paid_at
    }

    pub fn is_paid(&self) -> bool {
        self.status == PayableStatus::Paid
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid() && self.due_on < today
    }

    pub fn mark_paid(&mut self, at: i64) {
        self.status = PayableStatus::Paid;
        self.paid_at = Some(at);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    #[default]
    Open,
    Received,
}

impl ReceivableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceivableStatus::Open => "open",
            ReceivableStatus::Received => "received",
        }
    }
}

impl FromStr for ReceivableStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(ReceivableStatus::Open),
            "received" => Ok(ReceivableStatus::Received),
            other => Err(DomainError::invalid_input(format!(
                "Unknown receivable status '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountReceivable {
    id: String,
    branch_id: String,
    description: String,
    amount: Decimal,
    due_on: NaiveDate,
    status: ReceivableStatus,
    created_at: i64,
    received_at: Option<i64>,
}

impl AccountReceivable {
    pub fn new(branch_id: String, description: String, amount: Decimal, due_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            branch_id,
            description,
            amount,
            due_on,
            status: ReceivableStatus::Open,
            created_at: current_timestamp(),
            received_at: None,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        branch_id: String,
        description: String,
        amount: Decimal,
        due_on: NaiveDate,
        status: ReceivableStatus,
        created_at: i64,
        received_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            branch_id,
            description,
            amount,
            due_on,
            status,
            created_at,
            received_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn due_on(&self) -> NaiveDate {
        self.due_on
    }

    pub fn status(&self) -> ReceivableStatus {
        self.status
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn received_at(&self) -> Option<i64> {
        self.received_at
    }

    pub fn is_received(&self) -> bool {
        self.status == ReceivableStatus::Received
    }

    pub fn mark_received(&mut self, at: i64) {
        self.status = ReceivableStatus::Received;
        self.received_at = Some(at);
    }
}
