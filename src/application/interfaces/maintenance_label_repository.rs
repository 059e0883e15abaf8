use async_trait::async_trait;

use crate::domain::{DomainError, MaintenanceLabel};

/// Persistence for maintenance labels together with their replacement items.
#[async_trait]
pub trait MaintenanceLabelRepository: Send + Sync {
    /// Stores the label and its items atomically.
    async fn save(&self, label: &MaintenanceLabel) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<MaintenanceLabel>, DomainError>;

    /// Labels of a vehicle, newest service first.
    async fn list_by_vehicle(&self, vehicle_id: &str)
        -> Result<Vec<MaintenanceLabel>, DomainError>;
}
