use anyhow::Result;
use chrono::NaiveDate;

use crate::application::{NewMaintenanceLabel, NewReplacementItem};
use crate::cli::OutputFormat;
use crate::domain::{MaintenanceDueReport, MaintenanceLabel};

use super::super::Container;

pub struct MaintenanceController<'a> {
    container: &'a Container,
}

impl<'a> MaintenanceController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add(
        &self,
        vehicle_id: String,
        km_at_service: i64,
        performed_on: Option<NaiveDate>,
        notes: Option<String>,
        items: Vec<NewReplacementItem>,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewMaintenanceLabel {
            vehicle_id,
            performed_on: performed_on.unwrap_or_else(|| self.container.clock().today()),
            km_at_service,
            notes,
            items,
        };
        let label = self
            .container
            .create_maintenance_label_use_case()
            .execute(input)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&label)?,
            OutputFormat::Text => {
                let mut out = format!(
                    "Recorded maintenance {} with {} item(s), total cost {}",
                    label.id(),
                    label.items().len(),
                    label.total_cost()
                );
                if let Some(payable_id) = label.account_payable_id() {
                    out.push_str(&format!("\nPosted account payable {}", payable_id));
                }
                out
            }
        })
    }

    pub async fn due(
        &self,
        vehicle_id: String,
        reference_km: Option<i64>,
        format: OutputFormat,
    ) -> Result<String> {
        let report = self
            .container
            .maintenance_due_use_case()
            .by_vehicle(&vehicle_id, reference_km)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            OutputFormat::Text => format_report(&report),
        })
    }

    pub async fn branch_due(&self, branch_id: String, format: OutputFormat) -> Result<String> {
        let reports = self
            .container
            .maintenance_due_use_case()
            .by_branch(&branch_id)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
            OutputFormat::Text => {
                if reports.is_empty() {
                    return Ok("No vehicles need maintenance.".to_string());
                }
                reports
                    .iter()
                    .map(format_report)
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        })
    }

    pub async fn list(&self, vehicle_id: String, format: OutputFormat) -> Result<String> {
        let labels = self
            .container
            .create_maintenance_label_use_case()
            .list_by_vehicle(&vehicle_id)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&labels)?,
            OutputFormat::Text => format_label_list(&labels),
        })
    }
}

fn format_report(report: &MaintenanceDueReport) -> String {
    let mut out = format!(
        "{} at {} km: {} due, {} warning, {} ok\n",
        report.plate, report.reference_km, report.due_count, report.warning_count, report.ok_count
    );
    for item in &report.items {
        out.push_str(&format!(
            "  [{:<7}] {} next at {} km ({} km remaining)\n",
            item.status.as_str(),
            item.name,
            item.next_change_km,
            item.km_remaining
        ));
    }
    out
}

fn format_label_list(labels: &[MaintenanceLabel]) -> String {
    if labels.is_empty() {
        return "No maintenance recorded.".to_string();
    }

    let mut out = String::new();
    for label in labels {
        out.push_str(&format!(
            "  {} on {} at {} km, cost {} ({})\n",
            label.id(),
            label.performed_on(),
            label.km_at_service(),
            label.total_cost(),
            label
                .items()
                .iter()
                .map(|i| i.name())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    out
}
