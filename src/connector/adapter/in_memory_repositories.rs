//! In-memory adapters backing `--memory-storage` and the test suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{
    AccountPayableRepository, AccountReceivableRepository, BranchRepository, EmployeeRepository,
    MaintenanceLabelRepository, SalaryRepository, VacationRepository, VehicleRepository,
};
use crate::domain::{
    AccountPayable, AccountReceivable, Branch, DomainError, Employee, MaintenanceLabel,
    PayableStatus, Salary, Vacation, Vehicle,
};

pub struct InMemoryBranchRepository {
    branches: Arc<Mutex<HashMap<String, Branch>>>,
}

impl InMemoryBranchRepository {
    pub fn new() -> Self {
        Self {
            branches: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBranchRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn save(&self, branch: &Branch) -> Result<(), DomainError> {
        let mut store = self.branches.lock().await;
        store
            .entry(branch.id().to_string())
            .or_insert_with(|| branch.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Branch>, DomainError> {
        let store = self.branches.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn find_by_name(
        &self,
        company_id: &str,
        name: &str,
    ) -> Result<Option<Branch>, DomainError> {
        let store = self.branches.lock().await;
        Ok(store
            .values()
            .find(|b| b.company_id() == company_id && b.name() == name)
            .cloned())
    }

    async fn list(&self, company_id: &str) -> Result<Vec<Branch>, DomainError> {
        let store = self.branches.lock().await;
        let mut branches: Vec<Branch> = store
            .values()
            .filter(|b| b.company_id() == company_id)
            .cloned()
            .collect();
        branches.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(branches)
    }
}

pub struct InMemoryEmployeeRepository {
    employees: Arc<Mutex<HashMap<String, Employee>>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            employees: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut store = self.employees.lock().await;
        store.insert(employee.id().to_string(), employee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, DomainError> {
        let store = self.employees.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn find_by_document(
        &self,
        branch_id: &str,
        document: &str,
    ) -> Result<Option<Employee>, DomainError> {
        let store = self.employees.lock().await;
        Ok(store
            .values()
            .find(|e| e.branch_id() == branch_id && e.document() == document && !e.is_deleted())
            .cloned())
    }

    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Employee>, DomainError> {
        let store = self.employees.lock().await;
        let mut employees: Vec<Employee> = store
            .values()
            .filter(|e| e.branch_id() == branch_id && !e.is_deleted())
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(employees)
    }
}

pub struct InMemoryVehicleRepository {
    vehicles: Arc<Mutex<HashMap<String, Vehicle>>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn save(&self, vehicle: &Vehicle) -> Result<(), DomainError> {
        let mut store = self.vehicles.lock().await;
        store.insert(vehicle.id().to_string(), vehicle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, DomainError> {
        let store = self.vehicles.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn find_by_plate(
        &self,
        branch_id: &str,
        plate: &str,
    ) -> Result<Option<Vehicle>, DomainError> {
        let store = self.vehicles.lock().await;
        Ok(store
            .values()
            .find(|v| v.branch_id() == branch_id && v.plate() == plate && !v.is_deleted())
            .cloned())
    }

    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Vehicle>, DomainError> {
        let store = self.vehicles.lock().await;
        let mut vehicles: Vec<Vehicle> = store
            .values()
            .filter(|v| v.branch_id() == branch_id && !v.is_deleted())
            .cloned()
            .collect();
        vehicles.sort_by(|a, b| a.plate().cmp(b.plate()));
        Ok(vehicles)
    }
}

pub struct InMemoryMaintenanceLabelRepository {
    labels: Arc<Mutex<Vec<MaintenanceLabel>>>,
}

impl InMemoryMaintenanceLabelRepository {
    pub fn new() -> Self {
        Self {
            labels: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for InMemoryMaintenanceLabelRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MaintenanceLabelRepository for InMemoryMaintenanceLabelRepository {
    async fn save(&self, label: &MaintenanceLabel) -> Result<(), DomainError> {
        let mut store = self.labels.lock().await;
        match store.iter_mut().find(|l| l.id() == label.id()) {
            Some(existing) => *existing = label.clone(),
            None => store.push(label.clone()),
        }
        debug!(
            "Saved maintenance label {} with {} items to memory",
            label.id(),
            label.items().len()
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MaintenanceLabel>, DomainError> {
        let store = self.labels.lock().await;
        Ok(store.iter().find(|l| l.id() == id).cloned())
    }

    async fn list_by_vehicle(
        &self,
        vehicle_id: &str,
    ) -> Result<Vec<MaintenanceLabel>, DomainError> {
        let store = self.labels.lock().await;
        let mut labels: Vec<MaintenanceLabel> = store
            .iter()
            .filter(|l| l.vehicle_id() == vehicle_id)
            .cloned()
            .collect();
        labels.sort_by(|a, b| {
            b.performed_on()
                .cmp(&a.performed_on())
                .then(b.created_at().cmp(&a.created_at()))
        });
        Ok(labels)
    }
}

pub struct InMemorySalaryRepository {
    salaries: Arc<Mutex<Vec<Salary>>>,
}

impl InMemorySalaryRepository {
    pub fn new() -> Self {
        Self {
            salaries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for InMemorySalaryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SalaryRepository for InMemorySalaryRepository {
    async fn save(&self, salary: &Salary) -> Result<(), DomainError> {
        let mut store = self.salaries.lock().await;
        match store.iter_mut().find(|s| s.id() == salary.id()) {
            Some(existing) => *existing = salary.clone(),
            None => store.push(salary.clone()),
        }
        Ok(())
    }

    async fn create_batch(&self, salaries: &[Salary]) -> Result<(), DomainError> {
        let mut store = self.salaries.lock().await;

        for salary in salaries {
            let clash = store.iter().any(|s| {
                s.id() == salary.id()
                    || (s.employee_id() == salary.employee_id()
                        && s.month() == salary.month()
                        && s.year() == salary.year())
            });
            if clash {
                return Err(DomainError::already_exists(format!(
                    "Salary for employee {} in {} already exists",
                    salary.employee_id(),
                    salary.period_label()
                )));
            }
        }

        store.extend(salaries.iter().cloned());
        debug!("Saved {} salaries to memory", salaries.len());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Salary>, DomainError> {
        let store = self.salaries.lock().await;
        Ok(store.iter().find(|s| s.id() == id).cloned())
    }

    async fn list_by_period(
        &self,
        branch_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Salary>, DomainError> {
        let store = self.salaries.lock().await;
        Ok(store
            .iter()
            .filter(|s| s.branch_id() == branch_id && s.month() == month && s.year() == year)
            .cloned()
            .collect())
    }
}

pub struct InMemoryVacationRepository {
    vacations: Arc<Mutex<HashMap<String, Vacation>>>,
}

impl InMemoryVacationRepository {
    pub fn new() -> Self {
        Self {
            vacations: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryVacationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VacationRepository for InMemoryVacationRepository {
    async fn save(&self, vacation: &Vacation) -> Result<(), DomainError> {
        let mut store = self.vacations.lock().await;
        store.insert(vacation.id().to_string(), vacation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vacation>, DomainError> {
        let store = self.vacations.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn list_by_employee(&self, employee_id: &str) -> Result<Vec<Vacation>, DomainError> {
        let store = self.vacations.lock().await;
        let mut vacations: Vec<Vacation> = store
            .values()
            .filter(|v| v.employee_id() == employee_id)
            .cloned()
            .collect();
        vacations.sort_by(|a, b| {
            a.starts_on()
                .cmp(&b.starts_on())
                .then(a.created_at().cmp(&b.created_at()))
        });
        Ok(vacations)
    }
}

pub struct InMemoryAccountPayableRepository {
    payables: Arc<Mutex<HashMap<String, AccountPayable>>>,
}

impl InMemoryAccountPayableRepository {
    pub fn new() -> Self {
        Self {
            payables: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccountPayableRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountPayableRepository for InMemoryAccountPayableRepository {
    async fn save(&self, payable: &AccountPayable) -> Result<(), DomainError> {
        let mut store = self.payables.lock().await;
        store.insert(payable.id().to_string(), payable.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountPayable>, DomainError> {
        let store = self.payables.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn list_by_branch(
        &self,
        branch_id: &str,
        status: Option<PayableStatus>,
    ) -> Result<Vec<AccountPayable>, DomainError> {
        let store = self.payables.lock().await;
        let mut payables: Vec<AccountPayable> = store
            .values()
            .filter(|p| p.branch_id() == branch_id)
            .filter(|p| status.map_or(true, |s| p.status() == s))
            .cloned()
            .collect();
        payables.sort_by(|a, b| {
            a.due_on()
                .cmp(&b.due_on())
                .then(a.created_at().cmp(&b.created_at()))
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(payables)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut store = self.payables.lock().await;
        store.remove(id);
        Ok(())
    }
}

pub struct InMemoryAccountReceivableRepository {
    receivables: Arc<Mutex<HashMap<String, AccountReceivable>>>,
}

impl InMemoryAccountReceivableRepository {
    pub fn new() -> Self {
        Self {
            receivables: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccountReceivableRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountReceivableRepository for InMemoryAccountReceivableRepository {
    async fn save(&self, receivable: &AccountReceivable) -> Result<(), DomainError> {
        let mut store = self.receivables.lock().await;
        store.insert(receivable.id().to_string(), receivable.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<AccountReceivable>, DomainError> {
        let store = self.receivables.lock().await;
        Ok(store.get(id).cloned())
    }

    async fn list_by_branch(
        &self,
        branch_id: &str,
    ) -> Result<Vec<AccountReceivable>, DomainError> {
        let store = self.receivables.lock().await;
        let mut receivables: Vec<AccountReceivable> = store
            .values()
            .filter(|r| r.branch_id() == branch_id)
            .cloned()
            .collect();
        receivables.sort_by(|a, b| {
            a.due_on()
                .cmp(&b.due_on())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(receivables)
    }
}
