//! Client record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person receiving support, scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier.
    pub id: Uuid,
    /// The tenant that owns this record.
    pub tenant_id: Uuid,
    /// Full name.
    pub name: String,
    /// NDIS participant number, if known.
    pub ndis_number: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
