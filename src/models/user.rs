//! User, role, and session models.
//!
//! Authorization is evaluated through the [`Role`] enum's single `permits`
//! check rather than ad hoc role-string comparisons.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role held by a user within their tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access within the tenant.
    Admin,
    /// Rostering and client management.
    Coordinator,
    /// Read access plus completing own shifts.
    SupportWorker,
}

/// An operation class gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Creating or modifying client records and budgets.
    ManageClients,
    /// Creating shift series and rostering shifts.
    ManageRoster,
    /// Completing shifts.
    CompleteShifts,
    /// Reading tenant data.
    View,
}

impl Role {
    /// Returns whether this role may perform the given operation class.
    pub fn permits(self, permission: Permission) -> bool {
        match (self, permission) {
            (Role::Admin, _) => true,
            (Role::Coordinator, Permission::ManageClients) => true,
            (Role::Coordinator, Permission::ManageRoster) => true,
            (Role::Coordinator, Permission::CompleteShifts) => true,
            (Role::Coordinator, Permission::View) => true,
            (Role::SupportWorker, Permission::CompleteShifts) => true,
            (Role::SupportWorker, Permission::View) => true,
            (Role::SupportWorker, _) => false,
        }
    }
}

/// A staff member account, scoped to a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: Uuid,
    /// The tenant this user belongs to.
    pub tenant_id: Uuid,
    /// Display name.
    pub name: String,
    /// Role within the tenant.
    pub role: Role,
}

/// An authenticated session.
///
/// Sessions record the tenant claimed at creation time; the guard
/// re-validates on every request that the user still exists under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: Uuid,
    /// The user the session was minted for.
    pub user_id: Uuid,
    /// The tenant claimed by the session.
    pub tenant_id: Uuid,
}
