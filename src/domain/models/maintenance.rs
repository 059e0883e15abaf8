use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;

/// A tracked part or fluid that must be replaced every `replace_every_km`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementItem {
    name: String,
    last_change_km: i64,
    replace_every_km: i64,
    cost: Decimal,
}

impl ReplacementItem {
    pub fn new(name: String, last_change_km: i64, replace_every_km: i64, cost: Decimal) -> Self {
        Self {
            name,
            last_change_km,
            replace_every_km,
            cost,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_change_km(&self) -> i64 {
        self.last_change_km
    }

    pub fn replace_every_km(&self) -> i64 {
        self.replace_every_km
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }

    /// Saturates at `i64::MAX` instead of overflowing.
    pub fn next_change_km(&self) -> i64 {
        self.last_change_km.saturating_add(self.replace_every_km)
    }
}

/// Record of a service performed on a vehicle and the items it replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceLabel {
    id: String,
    vehicle_id: String,
    branch_id: String,
    performed_on: NaiveDate,
    km_at_service: i64,
    notes: Option<String>,
    items: Vec<ReplacementItem>,
    account_payable_id: Option<String>,
    created_at: i64,
}

impl MaintenanceLabel {
    pub fn new(
        vehicle_id: String,
        branch_id: String,
        performed_on: NaiveDate,
        km_at_service: i64,
        notes: Option<String>,
        items: Vec<ReplacementItem>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            vehicle_id,
            branch_id,
            performed_on,
            km_at_service,
            notes,
            items,
            account_payable_id: None,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        vehicle_id: String,
        branch_id: String,
        performed_on: NaiveDate,
        km_at_service: i64,
        notes: Option<String>,
        items: Vec<ReplacementItem>,
        account_payable_id: Option<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            vehicle_id,
            branch_id,
            performed_on,
            km_at_service,
            notes,
            items,
            account_payable_id,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn performed_on(&self) -> NaiveDate {
        self.performed_on
    }

    pub fn km_at_service(&self) -> i64 {
        self.km_at_service
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn items(&self) -> &[ReplacementItem] {
        &self.items
    }

    pub fn account_payable_id(&self) -> Option<&str> {
        self.account_payable_id.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn total_cost(&self) -> Decimal {
        self.items.iter().map(|item| item.cost).sum()
    }

    pub fn link_account_payable(&mut self, account_payable_id: String) {
        self.account_payable_id = Some(account_payable_id);
    }
}

/// Replacement status of an item relative to a reference odometer reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Due,
    Warning,
    Ok,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Due => "due",
            MaintenanceStatus::Warning => "warning",
            MaintenanceStatus::Ok => "ok",
        }
    }

    pub fn needs_attention(&self) -> bool {
        !matches!(self, MaintenanceStatus::Ok)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation of one replacement item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDue {
    pub name: String,
    pub label_id: String,
    pub last_change_km: i64,
    pub replace_every_km: i64,
    pub next_change_km: i64,
    /// Negative once the item is overdue.
    pub km_remaining: i64,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceDueReport {
    pub vehicle_id: String,
    pub plate: String,
    pub reference_km: i64,
    pub items: Vec<ItemDue>,
    pub due_count: usize,
    pub warning_count: usize,
    pub ok_count: usize,
}

impl MaintenanceDueReport {
    pub fn needs_attention(&self) -> bool {
        self.due_count + self.warning_count > 0
    }
}
