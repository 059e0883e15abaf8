use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{require_vehicle, ManagePayablesUseCase};
use crate::application::{MaintenanceLabelRepository, VehicleRepository};
use crate::domain::{
    check_km, DomainError, MaintenanceLabel, PayableSource, ReplacementItem, MAX_ODOMETER_KM,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReplacementItem {
    pub name: String,
    pub last_change_km: i64,
    pub replace_every_km: i64,
    #[serde(default)]
    pub cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaintenanceLabel {
    pub vehicle_id: String,
    pub performed_on: NaiveDate,
    pub km_at_service: i64,
    #[serde(default)]
    pub notes: Option<String>,
    pub items: Vec<NewReplacementItem>,
}

/// Records a service on a vehicle and posts its cost to accounts payable.
pub struct CreateMaintenanceLabelUseCase {
    label_repo: Arc<dyn MaintenanceLabelRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    payables: Arc<ManagePayablesUseCase>,
    payable_due_days: i64,
}

impl CreateMaintenanceLabelUseCase {
    pub fn new(
        label_repo: Arc<dyn MaintenanceLabelRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        payables: Arc<ManagePayablesUseCase>,
        payable_due_days: i64,
    ) -> Self {
        Self {
            label_repo,
            vehicle_repo,
            payables,
            payable_due_days,
        }
    }

    /// Writes happen in the order odometer, payable, label. A failed label
    /// save withdraws the payable; the advanced odometer stays.
    pub async fn execute(
        &self,
        input: NewMaintenanceLabel,
    ) -> Result<MaintenanceLabel, DomainError> {
        let items = validate_items(&input.items)?;
        check_km(input.km_at_service, "Service odometer")?;

        let mut vehicle =
            require_vehicle(self.vehicle_repo.as_ref(), &input.vehicle_id).await?;

        let notes = input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let mut label = MaintenanceLabel::new(
            vehicle.id().to_string(),
            vehicle.branch_id().to_string(),
            input.performed_on,
            input.km_at_service,
            notes,
            items,
        );

        if input.km_at_service > vehicle.current_km() {
            vehicle.advance_odometer(input.km_at_service);
            self.vehicle_repo.save(&vehicle).await?;
            debug!(
                "Advanced odometer of {} to {} km",
                vehicle.plate(),
                vehicle.current_km()
            );
        }

        let total_cost = label.total_cost();
        if total_cost > Decimal::ZERO {
            let due_on = label.performed_on() + Duration::days(self.payable_due_days);
            let payable = self
                .payables
                .post(
                    vehicle.branch_id(),
                    &format!("Maintenance {}", vehicle.plate()),
                    total_cost,
                    due_on,
                    PayableSource::MaintenanceLabel(label.id().to_string()),
                )
                .await?;
            label.link_account_payable(payable.id().to_string());
        }

        if let Err(e) = self.label_repo.save(&label).await {
            if let Some(payable_id) = label.account_payable_id() {
                self.payables.discard(payable_id).await?;
            }
            return Err(e);
        }

        info!(
            "Recorded maintenance label {} for {} ({} items, cost {})",
            label.id(),
            vehicle.plate(),
            label.items().len(),
            total_cost
        );
        Ok(label)
    }

    /// Labels of a vehicle, newest service first.
    pub async fn list_by_vehicle(
        &self,
        vehicle_id: &str,
    ) -> Result<Vec<MaintenanceLabel>, DomainError> {
        require_vehicle(self.vehicle_repo.as_ref(), vehicle_id).await?;
        self.label_repo.list_by_vehicle(vehicle_id).await
    }
}

fn validate_items(items: &[NewReplacementItem]) -> Result<Vec<ReplacementItem>, DomainError> {
    if items.is_empty() {
        return Err(DomainError::invalid_input(
            "A maintenance label needs at least one item",
        ));
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(items.len());

    for item in items {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_input("Item name must not be empty"));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(DomainError::invalid_input(format!(
                "Item '{}' appears more than once",
                name
            )));
        }
        if item.replace_every_km <= 0 || item.replace_every_km > MAX_ODOMETER_KM {
            return Err(DomainError::invalid_input(format!(
                "Replacement interval of '{}' must be between 1 and {} km",
                name, MAX_ODOMETER_KM
            )));
        }
        check_km(
            item.last_change_km,
            &format!("Last change odometer of '{}'", name),
        )?;
        if item.cost < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "Cost of '{}' must not be negative",
                name
            )));
        }

        validated.push(ReplacementItem::new(
            name.to_string(),
            item.last_change_km,
            item.replace_every_km,
            item.cost,
        ));
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{AccountPayableRepository, BranchRepository};
    use async_trait::async_trait;

    use crate::connector::{
        FixedClock, InMemoryAccountPayableRepository, InMemoryBranchRepository,
        InMemoryMaintenanceLabelRepository, InMemoryVehicleRepository,
    };
    use crate::domain::{Branch, Vehicle};

    struct FailingLabelRepository;

    #[async_trait]
    impl MaintenanceLabelRepository for FailingLabelRepository {
        async fn save(&self, _label: &MaintenanceLabel) -> Result<(), DomainError> {
            Err(DomainError::storage("disk full"))
        }

        async fn find_by_id(&self, _id: &str) -> Result<Option<MaintenanceLabel>, DomainError> {
            Ok(None)
        }

        async fn list_by_vehicle(
            &self,
            _vehicle_id: &str,
        ) -> Result<Vec<MaintenanceLabel>, DomainError> {
            Ok(Vec::new())
        }
    }

    struct Env {
        use_case: CreateMaintenanceLabelUseCase,
        vehicles: Arc<InMemoryVehicleRepository>,
        payables: Arc<InMemoryAccountPayableRepository>,
        vehicle: Vehicle,
    }

    async fn setup() -> Env {
        setup_with(Arc::new(InMemoryMaintenanceLabelRepository::new())).await
    }

    async fn setup_with(labels: Arc<dyn MaintenanceLabelRepository>) -> Env {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();

        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        let vehicle = Vehicle::new(branch.id().to_string(), "abc1234", "FH".to_string(), 50_000);
        vehicles.save(&vehicle).await.unwrap();

        let payables = Arc::new(InMemoryAccountPayableRepository::new());
        let payables_use_case = Arc::new(ManagePayablesUseCase::new(
            payables.clone(),
            branches,
            Arc::new(FixedClock::on(2024, 6, 15)),
        ));

        let use_case = CreateMaintenanceLabelUseCase::new(
            labels,
            vehicles.clone(),
            payables_use_case,
            30,
        );

        Env {
            use_case,
            vehicles,
            payables,
            vehicle,
        }
    }

    fn item(name: &str, every: i64, cost: Decimal) -> NewReplacementItem {
        NewReplacementItem {
            name: name.to_string(),
            last_change_km: 50_000,
            replace_every_km: every,
            cost,
        }
    }

    fn input(vehicle: &Vehicle, km: i64, items: Vec<NewReplacementItem>) -> NewMaintenanceLabel {
        NewMaintenanceLabel {
            vehicle_id: vehicle.id().to_string(),
            performed_on: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            km_at_service: km,
            notes: Some("  ".to_string()),
            items,
        }
    }

    #[tokio::test]
    async fn test_costly_label_posts_payable() {
        let env = setup().await;

        let label = env
            .use_case
            .execute(input(
                &env.vehicle,
                50_000,
                vec![
                    item("oil", 10_000, Decimal::new(15_000, 2)),
                    item("filter", 10_000, Decimal::new(5_000, 2)),
                ],
            ))
            .await
            .expect("label");

        assert!(label.notes().is_none());
        let payable_id = label.account_payable_id().expect("payable linked");
        let payable = env
            .payables
            .find_by_id(payable_id)
            .await
            .unwrap()
            .expect("payable stored");

        assert_eq!(payable.amount(), Decimal::new(20_000, 2));
        assert_eq!(payable.description(), "Maintenance ABC1234");
        assert_eq!(payable.due_on(), NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        assert_eq!(
            payable.source(),
            &PayableSource::MaintenanceLabel(label.id().to_string())
        );
    }

    #[tokio::test]
    async fn test_free_label_posts_nothing_and_advances_odometer() {
        let env = setup().await;

        let label = env
            .use_case
            .execute(input(
                &env.vehicle,
                52_000,
                vec![item("inspection", 20_000, Decimal::ZERO)],
            ))
            .await
            .unwrap();

        assert!(label.account_payable_id().is_none());
        assert!(env
            .payables
            .list_by_branch(env.vehicle.branch_id(), None)
            .await
            .unwrap()
            .is_empty());

        let vehicle = env.vehicles.find_by_id(env.vehicle.id()).await.unwrap().unwrap();
        assert_eq!(vehicle.current_km(), 52_000);

        let labels = env.use_case.list_by_vehicle(env.vehicle.id()).await.unwrap();
        assert_eq!(labels.len(), 1);
    }

    #[tokio::test]
    async fn test_item_validation() {
        let env = setup().await;

        let cases = vec![
            vec![],
            vec![item("oil", 0, Decimal::ZERO)],
            vec![item(" ", 100, Decimal::ZERO)],
            vec![item("oil", 100, Decimal::new(-1, 0))],
            vec![item("oil", 100, Decimal::ZERO), item("OIL", 200, Decimal::ZERO)],
        ];

        for items in cases {
            let err = env
                .use_case
                .execute(input(&env.vehicle, 50_000, items))
                .await
                .unwrap_err();
            assert!(err.is_invalid_input(), "unexpected error: {}", err);
        }
    }

    #[tokio::test]
    async fn test_failed_label_save_withdraws_payable() {
        let env = setup_with(Arc::new(FailingLabelRepository)).await;

        let err = env
            .use_case
            .execute(input(
                &env.vehicle,
                51_000,
                vec![item("oil", 10_000, Decimal::new(15_000, 2))],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::StorageError(_)));

        assert!(env
            .payables
            .list_by_branch(env.vehicle.branch_id(), None)
            .await
            .unwrap()
            .is_empty());

        // Retrying the same service does not move the odometer again.
        let vehicle = env.vehicles.find_by_id(env.vehicle.id()).await.unwrap().unwrap();
        assert_eq!(vehicle.current_km(), 51_000);
    }

    #[tokio::test]
    async fn test_readings_beyond_odometer_limit_are_rejected() {
        let env = setup().await;

        let mut huge_interval = item("oil", 10_000, Decimal::ZERO);
        huge_interval.replace_every_km = i64::MAX;
        let mut huge_last_change = item("oil", 10_000, Decimal::ZERO);
        huge_last_change.last_change_km = MAX_ODOMETER_KM + 1;

        for items in [vec![huge_interval], vec![huge_last_change]] {
            let err = env
                .use_case
                .execute(input(&env.vehicle, 50_000, items))
                .await
                .unwrap_err();
            assert!(err.is_invalid_input(), "unexpected error: {}", err);
        }

        let err = env
            .use_case
            .execute(input(
                &env.vehicle,
                i64::MAX,
                vec![item("oil", 10_000, Decimal::ZERO)],
            ))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_unknown_vehicle() {
        let env = setup().await;
        let mut new = input(&env.vehicle, 1, vec![item("oil", 100, Decimal::ZERO)]);
        new.vehicle_id = "ghost".to_string();

        assert!(env.use_case.execute(new).await.unwrap_err().is_not_found());
    }
}
