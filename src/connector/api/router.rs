use anyhow::Result;

use crate::cli::{
    BranchCommand, Commands, EmployeeCommand, MaintenanceCommand, PayableCommand, PayrollCommand,
    ReceivableCommand, VacationCommand, VehicleCommand,
};

use super::container::Container;
use super::controller::{
    BranchController, EmployeeController, FinanceController, MaintenanceController,
    PayrollController, VacationController, VehicleController,
};

pub struct Router<'a> {
    branch_controller: BranchController<'a>,
    employee_controller: EmployeeController<'a>,
    vehicle_controller: VehicleController<'a>,
    maintenance_controller: MaintenanceController<'a>,
    payroll_controller: PayrollController<'a>,
    vacation_controller: VacationController<'a>,
    finance_controller: FinanceController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            branch_controller: BranchController::new(container),
            employee_controller: EmployeeController::new(container),
            vehicle_controller: VehicleController::new(container),
            maintenance_controller: MaintenanceController::new(container),
            payroll_controller: PayrollController::new(container),
            vacation_controller: VacationController::new(container),
            finance_controller: FinanceController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Branch(command) => match command {
                BranchCommand::Add { name, format } => {
                    self.branch_controller.add(name, format).await
                }
                BranchCommand::List { format } => self.branch_controller.list(format).await,
            },
            Commands::Employee(command) => match command {
                EmployeeCommand::Add {
                    branch_id,
                    name,
                    document,
                    salary,
                    hired_on,
                    format,
                } => {
                    self.employee_controller
                        .add(branch_id, name, document, salary, hired_on, format)
                        .await
                }
                EmployeeCommand::List {
                    branch_id,
                    all,
                    format,
                } => self.employee_controller.list(branch_id, all, format).await,
                EmployeeCommand::SetSalary {
                    employee_id,
                    amount,
                    format,
                } => {
                    self.employee_controller
                        .set_salary(employee_id, amount, format)
                        .await
                }
                EmployeeCommand::Deactivate { employee_id } => {
                    self.employee_controller.deactivate(employee_id).await
                }
                EmployeeCommand::Delete { employee_id } => {
                    self.employee_controller.delete(employee_id).await
                }
            },
            Commands::Vehicle(command) => match command {
                VehicleCommand::Add {
                    branch_id,
                    plate,
                    model,
                    km,
                    format,
                } => {
                    self.vehicle_controller
                        .add(branch_id, plate, model, km, format)
                        .await
                }
                VehicleCommand::List { branch_id, format } => {
                    self.vehicle_controller.list(branch_id, format).await
                }
                VehicleCommand::Odometer {
                    vehicle_id,
                    km,
                    format,
                } => self.vehicle_controller.odometer(vehicle_id, km, format).await,
                VehicleCommand::Delete { vehicle_id } => {
                    self.vehicle_controller.delete(vehicle_id).await
                }
            },
            Commands::Maintenance(command) => match command {
                MaintenanceCommand::Add {
                    vehicle_id,
                    km,
                    performed_on,
                    notes,
                    items,
                    format,
                } => {
                    self.maintenance_controller
                        .add(vehicle_id, km, performed_on, notes, items, format)
                        .await
                }
                MaintenanceCommand::Due {
                    vehicle_id,
                    reference_km,
                    format,
                } => {
                    self.maintenance_controller
                        .due(vehicle_id, reference_km, format)
                        .await
                }
                MaintenanceCommand::BranchDue { branch_id, format } => {
                    self.maintenance_controller.branch_due(branch_id, format).await
                }
                MaintenanceCommand::List { vehicle_id, format } => {
                    self.maintenance_controller.list(vehicle_id, format).await
                }
            },
            Commands::Payroll(command) => match command {
                PayrollCommand::Process {
                    branch_id,
                    month,
                    year,
                    format,
                } => {
                    self.payroll_controller
                        .process(branch_id, month, year, format)
                        .await
                }
                PayrollCommand::List {
                    branch_id,
                    month,
                    year,
                    format,
                } => {
                    self.payroll_controller
                        .list(branch_id, month, year, format)
                        .await
                }
                PayrollCommand::Pay { salary_id } => self.payroll_controller.pay(salary_id).await,
            },
            Commands::Vacation(command) => match command {
                VacationCommand::Request {
                    employee_id,
                    starts_on,
                    ends_on,
                    format,
                } => {
                    self.vacation_controller
                        .request(employee_id, starts_on, ends_on, format)
                        .await
                }
                VacationCommand::List {
                    employee_id,
                    format,
                } => self.vacation_controller.list(employee_id, format).await,
                VacationCommand::Cancel { vacation_id } => {
                    self.vacation_controller.cancel(vacation_id).await
                }
            },
            Commands::Payable(command) => match command {
                PayableCommand::Add {
                    branch_id,
                    description,
                    amount,
                    due_on,
                    format,
                } => {
                    self.finance_controller
                        .add_payable(branch_id, description, amount, due_on, format)
                        .await
                }
                PayableCommand::List {
                    branch_id,
                    status,
                    format,
                } => {
                    self.finance_controller
                        .list_payables(branch_id, status, format)
                        .await
                }
                PayableCommand::Pay { payable_id } => self.finance_controller.pay(payable_id).await,
            },
            Commands::Receivable(command) => match command {
                ReceivableCommand::Add {
                    branch_id,
                    description,
                    amount,
                    due_on,
                    format,
                } => {
                    self.finance_controller
                        .add_receivable(branch_id, description, amount, due_on, format)
                        .await
                }
                ReceivableCommand::List { branch_id, format } => {
                    self.finance_controller
                        .list_receivables(branch_id, format)
                        .await
                }
                ReceivableCommand::Receive { receivable_id } => {
                    self.finance_controller.receive(receivable_id).await
                }
            },
            Commands::Serve { .. } => {
                anyhow::bail!("serve is handled by the binary, not the command router")
            }
        }
    }
}
