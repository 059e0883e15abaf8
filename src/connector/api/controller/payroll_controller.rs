use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::{PayrollRun, Salary};

use super::super::Container;

pub struct PayrollController<'a> {
    container: &'a Container,
}

impl<'a> PayrollController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn process(
        &self,
        branch_id: String,
        month: u32,
        year: i32,
        format: OutputFormat,
    ) -> Result<String> {
        let run = self
            .container
            .process_salaries_use_case()
            .execute(&branch_id, month, year)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&run)?,
            OutputFormat::Text => format_run(&run),
        })
    }

    pub async fn list(
        &self,
        branch_id: String,
        month: u32,
        year: i32,
        format: OutputFormat,
    ) -> Result<String> {
        let salaries = self
            .container
            .process_salaries_use_case()
            .list(&branch_id, month, year)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&salaries)?,
            OutputFormat::Text => format_salary_list(&salaries),
        })
    }

    pub async fn pay(&self, salary_id: String) -> Result<String> {
        let salary = self
            .container
            .process_salaries_use_case()
            .pay(&salary_id)
            .await?;
        Ok(format!(
            "Salary {} for {} paid ({}).",
            salary.id(),
            salary.period_label(),
            salary.amount()
        ))
    }
}

fn format_run(run: &PayrollRun) -> String {
    let mut out = format!(
        "Payroll {:02}/{}: {} created, {} already pending, {} already paid, {} without salary\n\
         Total created: {}\n\n",
        run.month,
        run.year,
        run.created,
        run.already_pending,
        run.already_paid,
        run.skipped_no_salary,
        run.total_created_amount
    );
    for entry in &run.entries {
        let amount = entry
            .amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "  {:<20} {:<18} {}\n",
            entry.employee_name,
            entry.outcome.as_str(),
            amount
        ));
    }
    out
}

fn format_salary_list(salaries: &[Salary]) -> String {
    if salaries.is_empty() {
        return "No salaries for this period.".to_string();
    }

    let mut out = String::new();
    for salary in salaries {
        out.push_str(&format!(
            "  {} employee {} {} [{}]\n",
            salary.id(),
            salary.employee_id(),
            salary.amount(),
            salary.status()
        ));
    }
    out
}
