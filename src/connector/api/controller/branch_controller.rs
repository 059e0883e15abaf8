use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::Branch;

use super::super::Container;

pub struct BranchController<'a> {
    container: &'a Container,
}

impl<'a> BranchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn add(&self, name: String, format: OutputFormat) -> Result<String> {
        let branch = self.container.branches_use_case().create(&name).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&branch)?,
            OutputFormat::Text => format!("Created branch {} ({})", branch.name(), branch.id()),
        })
    }

    pub async fn list(&self, format: OutputFormat) -> Result<String> {
        let branches = self.container.branches_use_case().list().await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&branches)?,
            OutputFormat::Text => self.format_branch_list(&branches),
        })
    }

    fn format_branch_list(&self, branches: &[Branch]) -> String {
        if branches.is_empty() {
            return format!("No branches for company {}.", self.container.company_id());
        }

        let mut output = format!("Branches of {}:\n\n", self.container.company_id());
        for branch in branches {
            output.push_str(&format!("  {} ({})\n", branch.name(), branch.id()));
        }
        output
    }
}
