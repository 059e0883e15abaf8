use async_trait::async_trait;

use crate::domain::{DomainError, Vehicle};

/// Persistence for vehicles.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Inserts or replaces the vehicle.
    async fn save(&self, vehicle: &Vehicle) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Vehicle>, DomainError>;

    /// Non-deleted vehicle with this (normalized) plate in the branch.
    async fn find_by_plate(
        &self,
        branch_id: &str,
        plate: &str,
    ) -> Result<Option<Vehicle>, DomainError>;

    /// Non-deleted vehicles of a branch ordered by plate.
    async fn list_by_branch(&self, branch_id: &str) -> Result<Vec<Vehicle>, DomainError>;
}
