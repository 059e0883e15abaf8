use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::application::NewReplacementItem;
use crate::domain::PayableStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create and list branches of the company
    #[command(subcommand)]
    Branch(BranchCommand),

    #[command(subcommand)]
    Employee(EmployeeCommand),

    #[command(subcommand)]
    Vehicle(VehicleCommand),

    /// Record services and check which parts are due for replacement
    #[command(subcommand)]
    Maintenance(MaintenanceCommand),

    /// Generate and pay monthly salaries
    #[command(subcommand)]
    Payroll(PayrollCommand),

    #[command(subcommand)]
    Vacation(VacationCommand),

    /// Accounts payable
    #[command(subcommand)]
    Payable(PayableCommand),

    /// Accounts receivable
    #[command(subcommand)]
    Receivable(ReceivableCommand),

    /// Start the JSON HTTP API
    Serve {
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },
}

#[derive(Subcommand)]
pub enum BranchCommand {
    Add {
        name: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    Add {
        branch_id: String,
        name: String,
        document: String,

        /// Monthly salary; employees without one are skipped by payroll
        #[arg(long)]
        salary: Option<Decimal>,

        /// Hiring date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        hired_on: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        branch_id: String,

        /// Include deactivated employees
        #[arg(long)]
        all: bool,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Set the monthly salary; omit the amount to clear it
    SetSalary {
        employee_id: String,
        amount: Option<Decimal>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Remove from payroll; the employee stays listed with --all
    Deactivate {
        employee_id: String,
    },

    /// Soft delete; past salaries keep pointing at the employee
    Delete {
        employee_id: String,
    },
}

#[derive(Subcommand)]
pub enum VehicleCommand {
    Add {
        branch_id: String,
        plate: String,
        model: String,

        #[arg(long, default_value = "0")]
        km: i64,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        branch_id: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Record a new odometer reading
    Odometer {
        vehicle_id: String,
        km: i64,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    Delete {
        vehicle_id: String,
    },
}

#[derive(Subcommand)]
pub enum MaintenanceCommand {
    /// Record a service with the parts that were replaced
    Add {
        vehicle_id: String,

        /// Odometer reading at the service
        #[arg(long)]
        km: i64,

        /// Service date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        performed_on: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,

        /// Replaced part as NAME:LAST_CHANGE_KM:EVERY_KM[:COST], repeatable
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<NewReplacementItem>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Status of every part of one vehicle
    Due {
        vehicle_id: String,

        /// Odometer to evaluate against, defaults to the vehicle's current reading
        #[arg(long)]
        reference_km: Option<i64>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Vehicles of a branch with parts due or close to due
    BranchDue {
        branch_id: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        vehicle_id: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
pub enum PayrollCommand {
    /// Create pending salaries for the current or previous month
    Process {
        branch_id: String,
        month: u32,
        year: i32,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        branch_id: String,
        month: u32,
        year: i32,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    Pay {
        salary_id: String,
    },
}

#[derive(Subcommand)]
pub enum VacationCommand {
    Request {
        employee_id: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        employee_id: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    Cancel {
        vacation_id: String,
    },
}

#[derive(Subcommand)]
pub enum PayableCommand {
    Add {
        branch_id: String,
        description: String,
        amount: Decimal,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_on: NaiveDate,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        branch_id: String,

        /// Only entries with this status (open, paid)
        #[arg(long)]
        status: Option<PayableStatus>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    Pay {
        payable_id: String,
    },
}

#[derive(Subcommand)]
pub enum ReceivableCommand {
    Add {
        branch_id: String,
        description: String,
        amount: Decimal,

        #[arg(long)]
        due_on: NaiveDate,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    List {
        branch_id: String,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Mark an entry as received
    Receive {
        receivable_id: String,
    },
}

/// Parses `NAME:LAST_CHANGE_KM:EVERY_KM[:COST]`.
pub fn parse_item(raw: &str) -> Result<NewReplacementItem, String> {
    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(format!(
            "expected NAME:LAST_CHANGE_KM:EVERY_KM[:COST], got '{}'",
            raw
        ));
    }

    let last_change_km = parts[1]
        .parse::<i64>()
        .map_err(|e| format!("invalid last change km '{}': {}", parts[1], e))?;
    let replace_every_km = parts[2]
        .parse::<i64>()
        .map_err(|e| format!("invalid interval km '{}': {}", parts[2], e))?;
    let cost = match parts.get(3) {
        Some(cost) => cost
            .parse::<Decimal>()
            .map_err(|e| format!("invalid cost '{}': {}", cost, e))?,
        None => Decimal::ZERO,
    };

    Ok(NewReplacementItem {
        name: parts[0].to_string(),
        last_change_km,
        replace_every_km,
        cost,
    })
}
