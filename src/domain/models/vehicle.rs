use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;
use crate::domain::DomainError;

/// Largest odometer reading or replacement interval accepted, in km.
pub const MAX_ODOMETER_KM: i64 = 10_000_000;

/// Rejects `km` outside `0..=MAX_ODOMETER_KM`; `what` names the field.
pub fn check_km(km: i64, what: &str) -> Result<(), DomainError> {
    if (0..=MAX_ODOMETER_KM).contains(&km) {
        Ok(())
    } else {
        Err(DomainError::invalid_input(format!(
            "{} must be between 0 and {} km, got {}",
            what, MAX_ODOMETER_KM, km
        )))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    branch_id: String,
    plate: String,
    model: String,
    current_km: i64,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
}

impl Vehicle {
    pub fn new(branch_id: String, plate: &str, model: String, current_km: i64) -> Self {
        let now = current_timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            branch_id,
            plate: normalize_plate(plate),
            model,
            current_km,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: String,
        branch_id: String,
        plate: String,
        model: String,
        current_km: i64,
        created_at: i64,
        updated_at: i64,
        deleted_at: Option<i64>,
    ) -> Self {
        Self {
            id,
            branch_id,
            plate,
            model,
            current_km,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn current_km(&self) -> i64 {
        self.current_km
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<i64> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Moves the odometer forward. Returns `false` (and leaves the reading
    /// untouched) when `km` is below the current reading.
    pub fn advance_odometer(&mut self, km: i64) -> bool {
        if km < self.current_km {
            return false;
        }
        self.current_km = km;
        self.updated_at = current_timestamp();
        true
    }

    pub fn soft_delete(&mut self, at: i64) {
        self.deleted_at = Some(at);
        self.updated_at = at;
    }

    pub fn summary(&self) -> String {
        format!("{} {} ({} km)", self.plate, self.model, self.current_km)
    }
}

/// Upper-cases the plate and drops surrounding whitespace.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}
