pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AccountPayableRepository, AccountReceivableRepository, BranchRepository, Clock,
    CreateMaintenanceLabelUseCase, EmployeeRepository, MaintenanceDueUseCase,
    MaintenanceLabelRepository, ManageBranchesUseCase, ManageEmployeesUseCase,
    ManagePayablesUseCase, ManageReceivablesUseCase, ManageVacationsUseCase,
    ManageVehiclesUseCase, NewEmployee, NewMaintenanceLabel, NewPayable, NewReceivable,
    NewReplacementItem, NewVacation, NewVehicle, ProcessSalariesUseCase, SalaryRepository,
    VacationRepository, VehicleRepository,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{Container, ContainerConfig, FixedClock, Router, SystemClock};

pub use domain::{
    AccountPayable, AccountReceivable, Branch, DomainError, Employee, ItemDue,
    MaintenanceDueReport, MaintenanceLabel, MaintenanceStatus, PayableSource, PayableStatus,
    PayrollEntry, PayrollOutcome, PayrollRun, ReceivableStatus, ReplacementItem, Salary,
    SalaryStatus, Vacation, VacationStatus, Vehicle,
};
