use std::sync::Arc;

use tracing::debug;

use super::{require_branch, require_vehicle};
use crate::application::{BranchRepository, MaintenanceLabelRepository, VehicleRepository};
use crate::domain::{build_due_report, check_km, DomainError, MaintenanceDueReport};

/// Computes which replacement items of a vehicle are due, close to due or ok.
pub struct MaintenanceDueUseCase {
    label_repo: Arc<dyn MaintenanceLabelRepository>,
    vehicle_repo: Arc<dyn VehicleRepository>,
    branch_repo: Arc<dyn BranchRepository>,
}

impl MaintenanceDueUseCase {
    pub fn new(
        label_repo: Arc<dyn MaintenanceLabelRepository>,
        vehicle_repo: Arc<dyn VehicleRepository>,
        branch_repo: Arc<dyn BranchRepository>,
    ) -> Self {
        Self {
            label_repo,
            vehicle_repo,
            branch_repo,
        }
    }

    /// `reference_km` defaults to the vehicle's current odometer.
    pub async fn by_vehicle(
        &self,
        vehicle_id: &str,
        reference_km: Option<i64>,
    ) -> Result<MaintenanceDueReport, DomainError> {
        if let Some(km) = reference_km {
            check_km(km, "Reference odometer")?;
        }

        let vehicle = require_vehicle(self.vehicle_repo.as_ref(), vehicle_id).await?;
        let labels = self.label_repo.list_by_vehicle(vehicle.id()).await?;
        let reference_km = reference_km.unwrap_or_else(|| vehicle.current_km());

        let report = build_due_report(&vehicle, &labels, reference_km);
        debug!(
            "Vehicle {} at {} km: {} due, {} warning, {} ok",
            report.plate, reference_km, report.due_count, report.warning_count, report.ok_count
        );
        Ok(report)
    }

    /// Reports for every vehicle of the branch that has something due or
    /// close to due.
    pub async fn by_branch(
        &self,
        branch_id: &str,
    ) -> Result<Vec<MaintenanceDueReport>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;

        let mut reports = Vec::new();
        for vehicle in self.vehicle_repo.list_by_branch(branch_id).await? {
            let labels = self.label_repo.list_by_vehicle(vehicle.id()).await?;
            let report = build_due_report(&vehicle, &labels, vehicle.current_km());
            if report.needs_attention() {
                reports.push(report);
            }
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::connector::{
        InMemoryBranchRepository, InMemoryMaintenanceLabelRepository, InMemoryVehicleRepository,
    };
    use crate::domain::{Branch, MaintenanceLabel, MaintenanceStatus, ReplacementItem, Vehicle};

    struct Env {
        use_case: MaintenanceDueUseCase,
        labels: Arc<InMemoryMaintenanceLabelRepository>,
        vehicles: Arc<InMemoryVehicleRepository>,
        branch: Branch,
    }

    async fn setup() -> Env {
        let branches = Arc::new(InMemoryBranchRepository::new());
        let branch = Branch::new("acme".to_string(), "North".to_string());
        branches.save(&branch).await.unwrap();
        let labels = Arc::new(InMemoryMaintenanceLabelRepository::new());
        let vehicles = Arc::new(InMemoryVehicleRepository::new());

        Env {
            use_case: MaintenanceDueUseCase::new(labels.clone(), vehicles.clone(), branches),
            labels,
            vehicles,
            branch,
        }
    }

    async fn vehicle_with_oil(env: &Env, plate: &str, km: i64, last_change: i64) -> Vehicle {
        let vehicle = Vehicle::new(env.branch.id().to_string(), plate, "FH".to_string(), km);
        env.vehicles.save(&vehicle).await.unwrap();

        let label = MaintenanceLabel::new(
            vehicle.id().to_string(),
            env.branch.id().to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            last_change,
            None,
            vec![ReplacementItem::new(
                "oil".to_string(),
                last_change,
                10_000,
                Decimal::ZERO,
            )],
        );
        env.labels.save(&label).await.unwrap();
        vehicle
    }

    #[tokio::test]
    async fn test_defaults_to_current_odometer() {
        let env = setup().await;
        let vehicle = vehicle_with_oil(&env, "a1", 19_500, 10_000).await;

        let report = env.use_case.by_vehicle(vehicle.id(), None).await.unwrap();
        assert_eq!(report.reference_km, 19_500);
        assert_eq!(report.items[0].status, MaintenanceStatus::Warning);
        assert_eq!(report.items[0].km_remaining, 500);
    }

    #[tokio::test]
    async fn test_explicit_reference_km() {
        let env = setup().await;
        let vehicle = vehicle_with_oil(&env, "a1", 12_000, 10_000).await;

        let report = env
            .use_case
            .by_vehicle(vehicle.id(), Some(21_000))
            .await
            .unwrap();
        assert_eq!(report.due_count, 1);

        assert!(env
            .use_case
            .by_vehicle(vehicle.id(), Some(-5))
            .await
            .unwrap_err()
            .is_invalid_input());
        assert!(env
            .use_case
            .by_vehicle(vehicle.id(), Some(i64::MAX))
            .await
            .unwrap_err()
            .is_invalid_input());
    }

    #[tokio::test]
    async fn test_branch_report_only_lists_vehicles_needing_attention() {
        let env = setup().await;
        let worn = vehicle_with_oil(&env, "worn", 25_000, 10_000).await;
        vehicle_with_oil(&env, "fresh", 11_000, 10_000).await;

        let reports = env.use_case.by_branch(env.branch.id()).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].vehicle_id, worn.id());

        assert!(env.use_case.by_branch("nope").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unknown_vehicle() {
        let env = setup().await;
        assert!(env
            .use_case
            .by_vehicle("ghost", None)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
