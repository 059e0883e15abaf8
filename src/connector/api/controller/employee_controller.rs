use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::application::NewEmployee;
use crate::cli::OutputFormat;
use crate::domain::Employee;

use super::super::Container;

pub struct EmployeeController<'a> {
    container: &'a Container,
}

impl<'a> EmployeeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add(
        &self,
        branch_id: String,
        name: String,
        document: String,
        monthly_salary: Option<Decimal>,
        hired_on: Option<NaiveDate>,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewEmployee {
            branch_id,
            name,
            document,
            monthly_salary,
            hired_on: hired_on.unwrap_or_else(|| self.container.clock().today()),
        };
        let employee = self.container.employees_use_case().create(input).await?;
        self.render(&employee, format, "Created employee")
    }

    pub async fn list(
        &self,
        branch_id: String,
        include_inactive: bool,
        format: OutputFormat,
    ) -> Result<String> {
        let employees = self
            .container
            .employees_use_case()
            .list(&branch_id, include_inactive)
            .await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&employees)?,
            OutputFormat::Text => format_employee_list(&employees),
        })
    }

    pub async fn set_salary(
        &self,
        employee_id: String,
        amount: Option<Decimal>,
        format: OutputFormat,
    ) -> Result<String> {
        let employee = self
            .container
            .employees_use_case()
            .set_monthly_salary(&employee_id, amount)
            .await?;
        self.render(&employee, format, "Updated employee")
    }

    pub async fn deactivate(&self, employee_id: String) -> Result<String> {
        let employee = self
            .container
            .employees_use_case()
            .deactivate(&employee_id)
            .await?;
        Ok(format!("Employee {} deactivated.", employee.name()))
    }

    pub async fn delete(&self, employee_id: String) -> Result<String> {
        self.container.employees_use_case().delete(&employee_id).await?;
        Ok("Employee deleted successfully.".to_string())
    }

    fn render(&self, employee: &Employee, format: OutputFormat, verb: &str) -> Result<String> {
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(employee)?,
            OutputFormat::Text => format!("{} {}", verb, describe(employee)),
        })
    }
}

fn describe(employee: &Employee) -> String {
    let salary = employee
        .monthly_salary()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "no salary".to_string());
    format!(
        "{} ({}), document {}, {}",
        employee.name(),
        employee.id(),
        employee.document(),
        salary
    )
}

fn format_employee_list(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees.".to_string();
    }

    let mut output = String::new();
    for employee in employees {
        let marker = if employee.is_active() { "" } else { " [inactive]" };
        output.push_str(&format!("  {}{}\n", describe(employee), marker));
    }
    output
}
