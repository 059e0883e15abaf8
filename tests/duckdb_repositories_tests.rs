use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::tempdir;

use fleetdesk::connector::{
    open_database, DuckdbBranchRepository, DuckdbEmployeeRepository, DuckdbFinanceRepository,
    DuckdbMaintenanceLabelRepository, DuckdbSalaryRepository, DuckdbVacationRepository,
    DuckdbVehicleRepository,
};
use fleetdesk::{
    AccountPayable, AccountPayableRepository, AccountReceivable, AccountReceivableRepository,
    Branch, BranchRepository, Employee, EmployeeRepository, MaintenanceLabel,
    MaintenanceLabelRepository, PayableSource, PayableStatus, ReceivableStatus, ReplacementItem,
    Salary, SalaryRepository, SalaryStatus, Vacation, VacationRepository, VacationStatus, Vehicle,
    VehicleRepository,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[tokio::test]
async fn duckdb_branch_repository_persists_across_reopen() {
    let dir = tempdir().expect("tempdir");
    let db_path = dir.path().join("fleetdesk.duckdb");

    let north = Branch::new("acme".to_string(), "North".to_string());
    let east = Branch::new("acme".to_string(), "East".to_string());
    let other = Branch::new("globex".to_string(), "North".to_string());

    {
        let repo = DuckdbBranchRepository::new(&db_path).await.expect("duckdb init");
        repo.save(&north).await.expect("save north");
        repo.save(&east).await.expect("save east");
        repo.save(&other).await.expect("save other");
    }

    let repo = DuckdbBranchRepository::new(&db_path).await.expect("reopen");

    let found = repo
        .find_by_id(north.id())
        .await
        .expect("find_by_id")
        .expect("branch exists");
    assert_eq!(found.name(), "North");
    assert_eq!(found.company_id(), "acme");
    assert_eq!(found.created_at(), north.created_at());

    let by_name = repo
        .find_by_name("globex", "North")
        .await
        .expect("find_by_name")
        .expect("branch exists");
    assert_eq!(by_name.id(), other.id());

    // list is scoped to the company and ordered by name
    let branches = repo.list("acme").await.expect("list");
    let names: Vec<_> = branches.iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["East", "North"]);

    assert!(repo.find_by_id("missing").await.expect("find").is_none());
}

#[tokio::test]
async fn duckdb_employee_repository_hides_soft_deleted_rows() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbEmployeeRepository::with_connection(conn)
        .await
        .expect("init");

    let ana = Employee::new(
        "b1".to_string(),
        "Ana".to_string(),
        "111".to_string(),
        Some(money(250_075)),
        date(2023, 3, 1),
    );
    let mut bruno = Employee::new(
        "b1".to_string(),
        "Bruno".to_string(),
        "222".to_string(),
        None,
        date(2022, 1, 10),
    );
    repo.save(&ana).await.expect("save ana");
    repo.save(&bruno).await.expect("save bruno");

    let loaded = repo
        .find_by_id(ana.id())
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(loaded.monthly_salary(), Some(money(250_075)));
    assert_eq!(loaded.hired_on(), date(2023, 3, 1));

    bruno.soft_delete(1_700_000_000);
    repo.save(&bruno).await.expect("update bruno");

    let listed = repo.list_by_branch("b1").await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), ana.id());

    assert!(repo
        .find_by_document("b1", "222")
        .await
        .expect("find_by_document")
        .is_none());

    // find_by_id still sees the deleted employee
    let deleted = repo
        .find_by_id(bruno.id())
        .await
        .expect("find")
        .expect("exists");
    assert!(deleted.is_deleted());
    assert!(!deleted.is_active());
    assert_eq!(deleted.deleted_at(), Some(1_700_000_000));
}

#[tokio::test]
async fn duckdb_vehicle_repository_lists_by_plate_and_soft_deletes() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbVehicleRepository::with_connection(conn)
        .await
        .expect("init");

    let truck = Vehicle::new("b1".to_string(), "zzz-9999", "Truck".to_string(), 120_000);
    let mut van = Vehicle::new("b1".to_string(), "abc-1234", "Van".to_string(), 5_000);
    repo.save(&truck).await.expect("save truck");
    repo.save(&van).await.expect("save van");

    let listed = repo.list_by_branch("b1").await.expect("list");
    let plates: Vec<_> = listed.iter().map(|v| v.plate()).collect();
    assert_eq!(plates, vec!["ABC-1234", "ZZZ-9999"]);

    assert!(van.advance_odometer(7_500));
    repo.save(&van).await.expect("update van");
    let found = repo
        .find_by_plate("b1", "ABC-1234")
        .await
        .expect("find_by_plate")
        .expect("exists");
    assert_eq!(found.current_km(), 7_500);

    van.soft_delete(1_700_000_000);
    repo.save(&van).await.expect("delete van");
    assert_eq!(repo.list_by_branch("b1").await.expect("list").len(), 1);
    assert!(repo
        .find_by_plate("b1", "ABC-1234")
        .await
        .expect("find_by_plate")
        .is_none());
}

#[tokio::test]
async fn duckdb_maintenance_label_repository_stores_items_with_label() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbMaintenanceLabelRepository::with_connection(conn)
        .await
        .expect("init");

    let older = MaintenanceLabel::new(
        "v1".to_string(),
        "b1".to_string(),
        date(2024, 1, 10),
        10_000,
        None,
        vec![ReplacementItem::new(
            "Oil".to_string(),
            10_000,
            5_000,
            money(8_000),
        )],
    );
    let mut newer = MaintenanceLabel::new(
        "v1".to_string(),
        "b1".to_string(),
        date(2024, 5, 2),
        15_000,
        Some("annual service".to_string()),
        vec![
            ReplacementItem::new("Oil".to_string(), 15_000, 5_000, money(8_500)),
            ReplacementItem::new("Brake pads".to_string(), 15_000, 30_000, money(42_000)),
        ],
    );
    newer.link_account_payable("p1".to_string());

    repo.save(&older).await.expect("save older");
    repo.save(&newer).await.expect("save newer");

    let labels = repo.list_by_vehicle("v1").await.expect("list");
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].id(), newer.id());
    assert_eq!(labels[1].id(), older.id());

    let loaded = &labels[0];
    assert_eq!(loaded.notes(), Some("annual service"));
    assert_eq!(loaded.account_payable_id(), Some("p1"));
    assert_eq!(loaded.items(), newer.items());
    assert_eq!(loaded.total_cost(), money(50_500));

    // Saving again replaces the item set instead of appending to it.
    repo.save(&newer).await.expect("save newer again");
    let reloaded = repo
        .find_by_id(newer.id())
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(reloaded.items().len(), 2);

    assert!(repo.list_by_vehicle("v2").await.expect("list").is_empty());
}

#[tokio::test]
async fn duckdb_salary_repository_batch_is_all_or_nothing() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbSalaryRepository::with_connection(conn)
        .await
        .expect("init");

    let first = Salary::new("e1".to_string(), "b1".to_string(), 6, 2024, money(300_000));
    let second = Salary::new("e2".to_string(), "b1".to_string(), 6, 2024, money(150_000));
    repo.create_batch(&[first.clone(), second.clone()])
        .await
        .expect("first batch");

    let stored = repo.list_by_period("b1", 6, 2024).await.expect("list");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|s| s.status() == SalaryStatus::Pending));

    // e3 is new but e1 clashes with an existing (employee, month, year).
    let fresh = Salary::new("e3".to_string(), "b1".to_string(), 6, 2024, money(100_000));
    let clash = Salary::new("e1".to_string(), "b1".to_string(), 6, 2024, money(1));
    let result = repo.create_batch(&[fresh.clone(), clash]).await;
    assert!(result.is_err());

    assert!(repo.find_by_id(fresh.id()).await.expect("find").is_none());
    assert_eq!(repo.list_by_period("b1", 6, 2024).await.expect("list").len(), 2);

    let mut paid = first.clone();
    paid.mark_paid(1_718_409_600);
    repo.save(&paid).await.expect("save paid");
    let loaded = repo
        .find_by_id(first.id())
        .await
        .expect("find")
        .expect("exists");
    assert!(loaded.is_paid());
    assert_eq!(loaded.paid_at(), Some(1_718_409_600));
    assert_eq!(loaded.amount(), money(300_000));

    assert!(repo.list_by_period("b1", 5, 2024).await.expect("list").is_empty());
}

#[tokio::test]
async fn duckdb_vacation_repository_orders_by_start_date() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbVacationRepository::with_connection(conn)
        .await
        .expect("init");

    let mut august = Vacation::new("e1".to_string(), date(2024, 8, 1), date(2024, 8, 10));
    let march = Vacation::new("e1".to_string(), date(2024, 3, 4), date(2024, 3, 8));
    repo.save(&august).await.expect("save august");
    repo.save(&march).await.expect("save march");

    august.cancel();
    repo.save(&august).await.expect("cancel august");

    let vacations = repo.list_by_employee("e1").await.expect("list");
    assert_eq!(vacations.len(), 2);
    assert_eq!(vacations[0].id(), march.id());
    assert_eq!(vacations[0].days(), 5);
    assert_eq!(vacations[1].status(), VacationStatus::Cancelled);
}

#[tokio::test]
async fn duckdb_finance_repository_round_trips_payables_and_receivables() {
    let dir = tempdir().expect("tempdir");
    let conn = open_database(&dir.path().join("fleetdesk.duckdb")).expect("open");
    let repo = DuckdbFinanceRepository::with_connection(conn)
        .await
        .expect("init");

    let later = AccountPayable::new(
        "b1".to_string(),
        "Maintenance ABC-1234".to_string(),
        money(50_500),
        date(2024, 6, 1),
        PayableSource::MaintenanceLabel("label-1".to_string()),
    );
    let mut sooner = AccountPayable::new(
        "b1".to_string(),
        "Rent".to_string(),
        money(1_000_000),
        date(2024, 5, 5),
        PayableSource::Manual,
    );
    AccountPayableRepository::save(&repo, &later)
        .await
        .expect("save later");
    AccountPayableRepository::save(&repo, &sooner)
        .await
        .expect("save sooner");

    sooner.mark_paid(1_715_000_000);
    AccountPayableRepository::save(&repo, &sooner)
        .await
        .expect("pay sooner");

    let all = AccountPayableRepository::list_by_branch(&repo, "b1", None)
        .await
        .expect("list");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id(), sooner.id());
    assert_eq!(all[1].source(), &PayableSource::MaintenanceLabel("label-1".to_string()));

    let open = AccountPayableRepository::list_by_branch(&repo, "b1", Some(PayableStatus::Open))
        .await
        .expect("list open");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id(), later.id());
    assert_eq!(open[0].amount(), money(50_500));

    AccountPayableRepository::delete(&repo, later.id())
        .await
        .expect("delete later");
    assert!(AccountPayableRepository::find_by_id(&repo, later.id())
        .await
        .expect("find")
        .is_none());
    AccountPayableRepository::delete(&repo, "missing")
        .await
        .expect("deleting a missing entry is a no-op");

    let mut invoice = AccountReceivable::new(
        "b1".to_string(),
        "Freight contract".to_string(),
        money(720_000),
        date(2024, 7, 15),
    );
    AccountReceivableRepository::save(&repo, &invoice)
        .await
        .expect("save receivable");
    invoice.mark_received(1_721_000_000);
    AccountReceivableRepository::save(&repo, &invoice)
        .await
        .expect("receive");

    let loaded = AccountReceivableRepository::find_by_id(&repo, invoice.id())
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(loaded.status(), ReceivableStatus::Received);
    assert_eq!(loaded.received_at(), Some(1_721_000_000));
    assert_eq!(loaded.due_on(), date(2024, 7, 15));
}
