use anyhow::Result;
use chrono::NaiveDate;

use crate::application::NewVacation;
use crate::cli::OutputFormat;
use crate::domain::Vacation;

use super::super::Container;

pub struct VacationController<'a> {
    container: &'a Container,
}

impl<'a> VacationController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn request(
        &self,
        employee_id: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        format: OutputFormat,
    ) -> Result<String> {
        let input = NewVacation {
            employee_id,
            starts_on,
            ends_on,
        };
        let vacation = self.container.vacations_use_case().request(input).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&vacation)?,
            OutputFormat::Text => format!("Scheduled vacation {}", describe(&vacation)),
        })
    }

    pub async fn list(&self, employee_id: String, format: OutputFormat) -> Result<String> {
        let vacations = self.container.vacations_use_case().list(&employee_id).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&vacations)?,
            OutputFormat::Text => {
                if vacations.is_empty() {
                    return Ok("No vacations.".to_string());
                }
                vacations
                    .iter()
                    .map(|v| format!("  {}\n", describe(v)))
                    .collect()
            }
        })
    }

    pub async fn cancel(&self, vacation_id: String) -> Result<String> {
        let vacation = self.container.vacations_use_case().cancel(&vacation_id).await?;
        Ok(format!("Cancelled vacation {}", describe(&vacation)))
    }
}

fn describe(vacation: &Vacation) -> String {
    format!(
        "{} from {} to {} ({} days) [{}]",
        vacation.id(),
        vacation.starts_on(),
        vacation.ends_on(),
        vacation.days(),
        vacation.status()
    )
}
