use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::current_timestamp;

/// Sub-unit of the company that owns vehicles, employees and ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    id: String,
    company_id: String,
    name: String,
    created_at: i64,
}

impl Branch {
    pub fn new(company_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            created_at: current_timestamp(),
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(id: String, company_id: String, name: String, created_at: i64) -> Self {
        Self {
            id,
            company_id,
            name,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}
