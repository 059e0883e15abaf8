//! Integration tests for FleetDesk.
//!
//! These tests drive the use cases through the container on in-memory
//! storage, with "today" pinned to 2024-06-15.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fleetdesk::{
    Branch, Container, ContainerConfig, FixedClock, MaintenanceStatus, NewEmployee,
    NewMaintenanceLabel, NewReplacementItem, NewVacation, NewVehicle, PayableSource,
    PayableStatus, PayrollOutcome,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn money(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

async fn setup_test_env() -> (Container, Branch) {
    let container = Container::new(ContainerConfig::in_memory())
        .await
        .expect("Failed to create container")
        .with_clock(Arc::new(FixedClock::on(2024, 6, 15)));
    let branch = container
        .branches_use_case()
        .create("Matriz")
        .await
        .expect("Failed to create branch");
    (container, branch)
}

fn employee(branch: &Branch, name: &str, document: &str, salary: Option<i64>) -> NewEmployee {
    NewEmployee {
        branch_id: branch.id().to_string(),
        name: name.to_string(),
        document: document.to_string(),
        monthly_salary: salary.map(money),
        hired_on: date(2023, 1, 2),
    }
}

fn item(name: &str, last_change_km: i64, replace_every_km: i64, cost: i64) -> NewReplacementItem {
    NewReplacementItem {
        name: name.to_string(),
        last_change_km,
        replace_every_km,
        cost: money(cost),
    }
}

#[tokio::test]
async fn test_payroll_run_is_idempotent_per_period() {
    let (container, branch) = setup_test_env().await;
    let employees = container.employees_use_case();

    employees
        .create(employee(&branch, "Bruno", "2", Some(2000)))
        .await
        .expect("create bruno");
    let ana = employees
        .create(employee(&branch, "Ana", "1", Some(3000)))
        .await
        .expect("create ana");
    employees
        .create(employee(&branch, "Carla", "3", None))
        .await
        .expect("create carla");
    let diego = employees
        .create(employee(&branch, "Diego", "4", Some(1000)))
        .await
        .expect("create diego");
    employees.deactivate(diego.id()).await.expect("deactivate");

    let payroll = container.process_salaries_use_case();
    let run = payroll
        .execute(branch.id(), 6, 2024)
        .await
        .expect("first run");

    assert_eq!(run.created, 2);
    assert_eq!(run.skipped_no_salary, 1);
    assert_eq!(run.already_pending, 0);
    assert_eq!(run.total_created_amount, money(5000));
    let names: Vec<_> = run.entries.iter().map(|e| e.employee_name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);

    let again = payroll
        .execute(branch.id(), 6, 2024)
        .await
        .expect("second run");
    assert_eq!(again.created, 0);
    assert_eq!(again.already_pending, 2);
    assert_eq!(again.skipped_no_salary, 1);
    assert_eq!(again.total_created_amount, Decimal::ZERO);

    let ana_salary = run
        .entries
        .iter()
        .find(|e| e.employee_id == ana.id())
        .and_then(|e| e.salary_id.clone())
        .expect("ana has a salary");
    payroll.pay(&ana_salary).await.expect("pay");
    assert!(payroll.pay(&ana_salary).await.unwrap_err().is_invalid_input());

    let third = payroll
        .execute(branch.id(), 6, 2024)
        .await
        .expect("third run");
    let ana_entry = third
        .entries
        .iter()
        .find(|e| e.employee_id == ana.id())
        .expect("ana entry");
    assert_eq!(ana_entry.outcome, PayrollOutcome::AlreadyPaid);
    assert_eq!(third.already_paid, 1);
    assert_eq!(third.already_pending, 1);

    let salaries = payroll.list(branch.id(), 6, 2024).await.expect("list");
    assert_eq!(salaries.len(), 2);
}

#[tokio::test]
async fn test_payroll_accepts_only_current_and_previous_month() {
    let (container, branch) = setup_test_env().await;
    let payroll = container.process_salaries_use_case();

    assert!(payroll.execute(branch.id(), 5, 2024).await.is_ok());
    assert!(payroll
        .execute(branch.id(), 4, 2024)
        .await
        .unwrap_err()
        .is_invalid_input());
    assert!(payroll
        .execute(branch.id(), 7, 2024)
        .await
        .unwrap_err()
        .is_invalid_input());
    assert!(payroll
        .execute(branch.id(), 13, 2024)
        .await
        .unwrap_err()
        .is_invalid_input());
    assert!(payroll
        .execute("missing", 6, 2024)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_maintenance_label_posts_payable_and_drives_due_report() {
    let (container, branch) = setup_test_env().await;

    let vehicle = container
        .vehicles_use_case()
        .create(NewVehicle {
            branch_id: branch.id().to_string(),
            plate: " abc-1234 ".to_string(),
            model: "Sprinter".to_string(),
            current_km: 10_000,
        })
        .await
        .expect("create vehicle");
    assert_eq!(vehicle.plate(), "ABC-1234");

    let label = container
        .create_maintenance_label_use_case()
        .execute(NewMaintenanceLabel {
            vehicle_id: vehicle.id().to_string(),
            performed_on: date(2024, 6, 1),
            km_at_service: 12_000,
            notes: None,
            items: vec![
                item("Oil", 12_000, 5_000, 80),
                item("Air filter", 8_000, 5_000, 40),
                item("Timing belt", 0, 12_500, 0),
            ],
        })
        .await
        .expect("create label");

    // The service advanced the odometer.
    let vehicle = container
        .vehicles_use_case()
        .get(vehicle.id())
        .await
        .expect("get vehicle");
    assert_eq!(vehicle.current_km(), 12_000);

    let payables = container
        .payables_use_case()
        .list(branch.id(), Some(PayableStatus::Open))
        .await
        .expect("list payables");
    assert_eq!(payables.len(), 1);
    let payable = &payables[0];
    assert_eq!(payable.amount(), money(120));
    assert_eq!(payable.due_on(), date(2024, 7, 1));
    assert_eq!(payable.description(), "Maintenance ABC-1234");
    assert_eq!(
        payable.source(),
        &PayableSource::MaintenanceLabel(label.id().to_string())
    );
    assert_eq!(label.account_payable_id(), Some(payable.id()));

    let due = container.maintenance_due_use_case();

    let report = due
        .by_vehicle(vehicle.id(), Some(12_600))
        .await
        .expect("report");
    let statuses: Vec<_> = report
        .items
        .iter()
        .map(|i| (i.name.as_str(), i.status, i.km_remaining))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("Timing belt", MaintenanceStatus::Due, -100),
            ("Air filter", MaintenanceStatus::Warning, 400),
            ("Oil", MaintenanceStatus::Ok, 4_400),
        ]
    );
    assert_eq!(
        (report.due_count, report.warning_count, report.ok_count),
        (1, 1, 1)
    );

    // Without a reference the current odometer (12 000 km) is used.
    let current = due.by_vehicle(vehicle.id(), None).await.expect("report");
    assert_eq!(current.reference_km, 12_000);
    assert_eq!(current.due_count, 0);
    assert_eq!(current.warning_count, 1);

    let branch_reports = due.by_branch(branch.id()).await.expect("branch due");
    assert_eq!(branch_reports.len(), 1);
    assert_eq!(branch_reports[0].vehicle_id, vehicle.id());

    assert!(due
        .by_vehicle(vehicle.id(), Some(-1))
        .await
        .unwrap_err()
        .is_invalid_input());
}

#[tokio::test]
async fn test_label_without_cost_posts_no_payable() {
    let (container, branch) = setup_test_env().await;
    let vehicle = container
        .vehicles_use_case()
        .create(NewVehicle {
            branch_id: branch.id().to_string(),
            plate: "XYZ-0001".to_string(),
            model: "Hilux".to_string(),
            current_km: 30_000,
        })
        .await
        .expect("create vehicle");

    let label = container
        .create_maintenance_label_use_case()
        .execute(NewMaintenanceLabel {
            vehicle_id: vehicle.id().to_string(),
            performed_on: date(2024, 6, 10),
            km_at_service: 25_000,
            notes: Some("  ".to_string()),
            items: vec![item("Wipers", 25_000, 20_000, 0)],
        })
        .await
        .expect("create label");

    assert!(label.account_payable_id().is_none());
    assert!(label.notes().is_none());
    assert!(container
        .payables_use_case()
        .list(branch.id(), None)
        .await
        .expect("list")
        .is_empty());

    // A service recorded at a lower reading never rolls the odometer back.
    let vehicle = container
        .vehicles_use_case()
        .get(vehicle.id())
        .await
        .expect("get");
    assert_eq!(vehicle.current_km(), 30_000);
}

#[tokio::test]
async fn test_vacation_overlap_and_cancellation() {
    let (container, branch) = setup_test_env().await;
    let ana = container
        .employees_use_case()
        .create(employee(&branch, "Ana", "1", Some(3000)))
        .await
        .expect("create ana");
    let vacations = container.vacations_use_case();

    let july = vacations
        .request(NewVacation {
            employee_id: ana.id().to_string(),
            starts_on: date(2024, 7, 1),
            ends_on: date(2024, 7, 10),
        })
        .await
        .expect("request july");
    assert_eq!(july.days(), 10);

    let overlapping = NewVacation {
        employee_id: ana.id().to_string(),
        starts_on: date(2024, 7, 5),
        ends_on: date(2024, 7, 12),
    };
    assert!(vacations
        .request(overlapping.clone())
        .await
        .unwrap_err()
        .is_already_exists());

    let too_long = NewVacation {
        employee_id: ana.id().to_string(),
        starts_on: date(2024, 9, 1),
        ends_on: date(2024, 10, 10),
    };
    assert!(vacations
        .request(too_long)
        .await
        .unwrap_err()
        .is_invalid_input());

    vacations.cancel(july.id()).await.expect("cancel");
    assert!(vacations.cancel(july.id()).await.unwrap_err().is_invalid_input());

    vacations
        .request(overlapping)
        .await
        .expect("slot is free after cancel");
    assert_eq!(vacations.list(ana.id()).await.expect("list").len(), 2);
}

#[tokio::test]
async fn test_finance_entries_can_be_settled_once() {
    let (container, branch) = setup_test_env().await;

    let payables = container.payables_use_case();
    let rent = payables
        .create(fleetdesk::NewPayable {
            branch_id: branch.id().to_string(),
            description: "Rent".to_string(),
            amount: money(4500),
            due_on: date(2024, 6, 10),
        })
        .await
        .expect("create payable");
    let paid = payables.pay(rent.id()).await.expect("pay");
    assert!(paid.is_paid());
    assert!(payables.pay(rent.id()).await.unwrap_err().is_invalid_input());

    assert!(payables
        .create(fleetdesk::NewPayable {
            branch_id: branch.id().to_string(),
            description: "Nothing".to_string(),
            amount: Decimal::ZERO,
            due_on: date(2024, 6, 10),
        })
        .await
        .unwrap_err()
        .is_invalid_input());

    let receivables = container.receivables_use_case();
    let freight = receivables
        .create(fleetdesk::NewReceivable {
            branch_id: branch.id().to_string(),
            description: "Freight".to_string(),
            amount: money(9000),
            due_on: date(2024, 6, 30),
        })
        .await
        .expect("create receivable");
    receivables.receive(freight.id()).await.expect("receive");
    assert!(receivables
        .receive(freight.id())
        .await
        .unwrap_err()
        .is_invalid_input());
    assert!(receivables
        .receive("missing")
        .await
        .unwrap_err()
        .is_not_found());
}
