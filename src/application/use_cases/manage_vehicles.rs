use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::require_branch;
use crate::application::{BranchRepository, Clock, VehicleRepository};
use crate::domain::{check_km, normalize_plate, DomainError, Vehicle};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVehicle {
    pub branch_id: String,
    pub plate: String,
    pub model: String,
    #[serde(default)]
    pub current_km: i64,
}

pub struct ManageVehiclesUseCase {
    vehicle_repo: Arc<dyn VehicleRepository>,
    branch_repo: Arc<dyn BranchRepository>,
    clock: Arc<dyn Clock>,
}

impl ManageVehiclesUseCase {
    pub fn new(
        vehicle_repo: Arc<dyn VehicleRepository>,
        branch_repo: Arc<dyn BranchRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vehicle_repo,
            branch_repo,
            clock,
        }
    }

    pub async fn create(&self, input: NewVehicle) -> Result<Vehicle, DomainError> {
        let plate = normalize_plate(&input.plate);
        if plate.is_empty() {
            return Err(DomainError::invalid_input("Plate must not be empty"));
        }
        check_km(input.current_km, "Odometer")?;

        require_branch(self.branch_repo.as_ref(), &input.branch_id).await?;

        if self
            .vehicle_repo
            .find_by_plate(&input.branch_id, &plate)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists(format!(
                "Vehicle with plate {} already exists in this branch",
                plate
            )));
        }

        let vehicle = Vehicle::new(
            input.branch_id,
            &plate,
            input.model.trim().to_string(),
            input.current_km,
        );
        self.vehicle_repo.save(&vehicle).await?;

        info!("Registered vehicle {} ({})", vehicle.plate(), vehicle.id());
        Ok(vehicle)
    }

    pub async fn list(&self, branch_id: &str) -> Result<Vec<Vehicle>, DomainError> {
        require_branch(self.branch_repo.as_ref(), branch_id).await?;
        self.vehicle_repo.list_by_branch(branch_id).await
    }

    pub async fn get(&self, id: &str) -> Result<Vehicle, DomainError> {
        require_vehicle(self.vehicle_repo.as_ref(), id).await
    }

    pub async fn update_odometer(&self, id: &str, km: i64) -> Result<Vehicle, DomainError> {
        check_km(km, "Odometer")?;
        let mut vehicle = require_vehicle(self.vehicle_repo.as_ref(), id).await?;

        if !vehicle.advance_odometer(km) {
            return Err(DomainError::invalid_input(format!(
                "Odometer cannot go back from {} to {} km",
                vehicle.current_km(),
                km
            )));
        }
        self.vehicle_repo.save(&vehicle).await?;

        info!("Vehicle {} odometer at {} km", vehicle.plate(), km);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let mut vehicle = require_vehicle(self.vehicle_repo.as_ref(), id).await?;
        vehicle.soft_delete(self.clock.now());
        self.vehicle_repo.save(&vehicle).await?;

        info!("Deleted vehicle {} ({})", vehicle.plate(), vehicle.id());
        Ok(())
    }
}

/// Loads a non-deleted vehicle or fails with `NotFound`.
pub(crate) async fn require_vehicle(
    vehicle_repo: &dyn VehicleRepository,
    id: &str,
) -> Result<Vehicle, DomainError> {
    vehicle_repo
        .find_by_id(id)
        .await?
        .filter(|v| !v.is_deleted())
        .ok_or_else(|| DomainError::not_found(format!("Vehicle not found: {}", id)))
}
