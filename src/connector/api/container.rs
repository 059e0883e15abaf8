use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    AccountPayableRepository, AccountReceivableRepository, BranchRepository, Clock,
    CreateMaintenanceLabelUseCase, EmployeeRepository, MaintenanceDueUseCase,
    MaintenanceLabelRepository, ManageBranchesUseCase, ManageEmployeesUseCase,
    ManagePayablesUseCase, ManageReceivablesUseCase, ManageVacationsUseCase,
    ManageVehiclesUseCase, ProcessSalariesUseCase, SalaryRepository, VacationRepository,
    VehicleRepository,
};
use crate::connector::adapter::{
    open_database, DuckdbBranchRepository, DuckdbEmployeeRepository, DuckdbFinanceRepository,
    DuckdbMaintenanceLabelRepository, DuckdbSalaryRepository, DuckdbVacationRepository,
    DuckdbVehicleRepository, InMemoryAccountPayableRepository,
    InMemoryAccountReceivableRepository, InMemoryBranchRepository, InMemoryEmployeeRepository,
    InMemoryMaintenanceLabelRepository, InMemorySalaryRepository, InMemoryVacationRepository,
    InMemoryVehicleRepository, SystemClock,
};

pub const DATABASE_FILE: &str = "fleetdesk.duckdb";
pub const DEFAULT_COMPANY_ID: &str = "default-company";
pub const DEFAULT_PAYABLE_DUE_DAYS: i64 = 30;
pub const DEFAULT_MAX_VACATION_DAYS: i64 = 30;

pub struct ContainerConfig {
    pub data_dir: String,
    /// Keep every record in process memory; nothing is written to disk.
    pub memory_storage: bool,
    /// Company that owns the branches created through this process.
    pub company_id: String,
    /// Days between a maintenance service and the due date of its bill.
    pub payable_due_days: i64,
    pub max_vacation_days: i64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            memory_storage: false,
            company_id: DEFAULT_COMPANY_ID.to_string(),
            payable_due_days: DEFAULT_PAYABLE_DUE_DAYS,
            max_vacation_days: DEFAULT_MAX_VACATION_DAYS,
        }
    }
}

impl ContainerConfig {
    pub fn in_memory() -> Self {
        Self {
            memory_storage: true,
            ..Self::default()
        }
    }
}

pub struct Container {
    branch_repo: Arc<dyn BranchRepository>,
    employee_repo: Arc<dyn EmployeeRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    label_repo: Arc<dyn MaintenanceLabelRepository>,
    salary_repo: Arc<dyn SalaryRepository>,
    vacation_repo: Arc<dyn VacationRepository>,
    payable_repo: Arc<dyn AccountPayableRepository>,
    receivable_repo: Arc<dyn AccountReceivableRepository>,
    clock: Arc<dyn Clock>,
    config: ContainerConfig,
}

impl Container {
    pub async fn new(config: ContainerConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        if config.memory_storage {
            debug!("Using in-memory storage");
            return Ok(Self {
                branch_repo: Arc::new(InMemoryBranchRepository::new()),
                employee_repo: Arc::new(InMemoryEmployeeRepository::new()),
                vehicle_repo: Arc::new(InMemoryVehicleRepository::new()),
                label_repo: Arc::new(InMemoryMaintenanceLabelRepository::new()),
                salary_repo: Arc::new(InMemorySalaryRepository::new()),
                vacation_repo: Arc::new(InMemoryVacationRepository::new()),
                payable_repo: Arc::new(InMemoryAccountPayableRepository::new()),
                receivable_repo: Arc::new(InMemoryAccountReceivableRepository::new()),
                clock,
                config,
            });
        }

        let db_path = PathBuf::from(&config.data_dir).join(DATABASE_FILE);
        debug!("Using DuckDB storage at {:?}", db_path);

        // Every adapter shares the one connection; DuckDB takes a single writer per file.
        let shared_conn = open_database(&db_path)?;
        let branch_repo = DuckdbBranchRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let employee_repo =
            DuckdbEmployeeRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let vehicle_repo =
            DuckdbVehicleRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let label_repo =
            DuckdbMaintenanceLabelRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let salary_repo = DuckdbSalaryRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let vacation_repo =
            DuckdbVacationRepository::with_connection(Arc::clone(&shared_conn)).await?;
        let finance_repo = Arc::new(DuckdbFinanceRepository::with_connection(shared_conn).await?);

        Ok(Self {
            branch_repo: Arc::new(branch_repo),
            employee_repo: Arc::new(employee_repo),
            vehicle_repo: Arc::new(vehicle_repo),
            label_repo: Arc::new(label_repo),
            salary_repo: Arc::new(salary_repo),
            vacation_repo: Arc::new(vacation_repo),
            payable_repo: finance_repo.clone(),
            receivable_repo: finance_repo,
            clock,
            config,
        })
    }

    /// Replaces the system clock, e.g. to pin "today" for payroll.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn branches_use_case(&self) -> ManageBranchesUseCase {
        ManageBranchesUseCase::new(self.branch_repo.clone(), self.config.company_id.clone())
    }

    pub fn employees_use_case(&self) -> ManageEmployeesUseCase {
        ManageEmployeesUseCase::new(
            self.employee_repo.clone(),
            self.branch_repo.clone(),
            self.clock.clone(),
        )
    }

    pub fn vehicles_use_case(&self) -> ManageVehiclesUseCase {
        ManageVehiclesUseCase::new(
            self.vehicle_repo.clone(),
            self.branch_repo.clone(),
            self.clock.clone(),
        )
    }

    pub fn create_maintenance_label_use_case(&self) -> CreateMaintenanceLabelUseCase {
        CreateMaintenanceLabelUseCase::new(
            self.label_repo.clone(),
            self.vehicle_repo.clone(),
            Arc::new(self.payables_use_case()),
            self.config.payable_due_days,
        )
    }

    pub fn maintenance_due_use_case(&self) -> MaintenanceDueUseCase {
        MaintenanceDueUseCase::new(
            self.label_repo.clone(),
            self.vehicle_repo.clone(),
            self.branch_repo.clone(),
        )
    }

    pub fn process_salaries_use_case(&self) -> ProcessSalariesUseCase {
        ProcessSalariesUseCase::new(
            self.salary_repo.clone(),
            self.employee_repo.clone(),
            self.branch_repo.clone(),
            self.clock.clone(),
        )
    }

    pub fn vacations_use_case(&self) -> ManageVacationsUseCase {
        ManageVacationsUseCase::new(
            self.vacation_repo.clone(),
            self.employee_repo.clone(),
            self.config.max_vacation_days,
        )
    }

    pub fn payables_use_case(&self) -> ManagePayablesUseCase {
        ManagePayablesUseCase::new(
            self.payable_repo.clone(),
            self.branch_repo.clone(),
            self.clock.clone(),
        )
    }

    pub fn receivables_use_case(&self) -> ManageReceivablesUseCase {
        ManageReceivablesUseCase::new(
            self.receivable_repo.clone(),
            self.branch_repo.clone(),
            self.clock.clone(),
        )
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn company_id(&self) -> &str {
        &self.config.company_id
    }

    pub fn memory_storage(&self) -> bool {
        self.config.memory_storage
    }
}
