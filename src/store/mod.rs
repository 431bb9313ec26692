//! In-memory, tenant-scoped persistence.
//!
//! The store is the only shared mutable state in the engine. Every accessor
//! takes the requesting tenant and treats rows owned by other tenants as
//! not-found. Shift rows generated from a series are inserted one at a time
//! with no batch atomicity; a failure partway through a series leaves the
//! earlier rows persisted.
//!
//! Budget deductions are a single conditional decrement executed under the
//! store's write lock, so a balance can never be driven negative by
//! concurrent completions.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};
use crate::models::{
    BudgetLedgerEntry, Client, FundingCategory, Session, ShiftInstance, ShiftStatus, User,
};

/// Outcome of a conditional budget deduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum DeductionOutcome {
    /// The balance covered the cost and was decremented.
    Applied {
        /// The balance remaining after the deduction.
        new_balance: Decimal,
    },
    /// The balance did not cover the cost; nothing was deducted.
    InsufficientBalance {
        /// The untouched remaining balance.
        remaining: Decimal,
        /// The cost that could not be covered.
        required: Decimal,
    },
}

/// Billing instruction passed to [`RosterStore::complete_shift`].
#[derive(Debug, Clone)]
pub struct BudgetCharge {
    /// The funding category to draw from.
    pub category: FundingCategory,
    /// The cost to deduct.
    pub cost: Decimal,
    /// Free-text activity description recorded on the ledger entry.
    pub note: Option<String>,
}

#[derive(Default)]
struct StoreInner {
    users: HashMap<Uuid, User>,
    sessions: HashMap<Uuid, Session>,
    clients: HashMap<Uuid, Client>,
    shifts: HashMap<Uuid, ShiftInstance>,
    budgets: HashMap<(Uuid, FundingCategory), BudgetLedgerEntry>,
}

/// The in-memory store shared across request handlers.
#[derive(Default)]
pub struct RosterStore {
    inner: RwLock<StoreInner>,
}

impl RosterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Users & sessions
    // ------------------------------------------------------------------

    /// Inserts a user record.
    pub fn create_user(&self, user: User) {
        self.write().users.insert(user.id, user);
    }

    /// Removes a user record, invalidating any sessions that point at it.
    pub fn remove_user(&self, user_id: Uuid) {
        self.write().users.remove(&user_id);
    }

    /// Mints a session token for an existing user.
    ///
    /// The session claims the user's tenant at creation time.
    pub fn create_session(&self, user_id: Uuid) -> RosterResult<Session> {
        let mut inner = self.write();
        let user = inner
            .users
            .get(&user_id)
            .ok_or(RosterError::NotFound {
                entity: "User",
                id: user_id,
            })?;
        let session = Session {
            token: Uuid::new_v4(),
            user_id,
            tenant_id: user.tenant_id,
        };
        inner.sessions.insert(session.token, session.clone());
        Ok(session)
    }

    /// Resolves a session token, re-validating that the session's user
    /// still exists under the claimed tenant.
    ///
    /// Returns `None` for unknown tokens; `Err(Forbidden)` when the user
    /// has been removed or no longer belongs to the claimed tenant.
    pub fn resolve_session(&self, token: Uuid) -> RosterResult<Option<(Session, User)>> {
        let inner = self.read();
        let Some(session) = inner.sessions.get(&token) else {
            return Ok(None);
        };
        let user = inner
            .users
            .get(&session.user_id)
            .ok_or_else(|| RosterError::Forbidden {
                message: "session user no longer exists".to_string(),
            })?;
        if user.tenant_id != session.tenant_id {
            return Err(RosterError::Forbidden {
                message: "session user no longer belongs to the claimed tenant".to_string(),
            });
        }
        Ok(Some((session.clone(), user.clone())))
    }

    // ------------------------------------------------------------------
    // Clients & budgets
    // ------------------------------------------------------------------

    /// Inserts a client record.
    pub fn create_client(&self, client: Client) {
        self.write().clients.insert(client.id, client);
    }

    /// Fetches a client under the given tenant.
    pub fn get_client(&self, tenant_id: Uuid, client_id: Uuid) -> RosterResult<Client> {
        self.read()
            .clients
            .get(&client_id)
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .ok_or(RosterError::NotFound {
                entity: "Client",
                id: client_id,
            })
    }

    /// Lists the tenant's clients, ordered by creation time.
    pub fn list_clients(&self, tenant_id: Uuid) -> Vec<Client> {
        let mut clients: Vec<Client> = self
            .read()
            .clients
            .values()
            .filter(|c| c.tenant_id == tenant_id)
            .cloned()
            .collect();
        clients.sort_by_key(|c| c.created_at);
        clients
    }

    /// Creates or replaces the budget entry for a client and category.
    pub fn upsert_budget(
        &self,
        tenant_id: Uuid,
        entry: BudgetLedgerEntry,
    ) -> RosterResult<()> {
        let mut inner = self.write();
        let owned = inner
            .clients
            .get(&entry.client_id)
            .is_some_and(|c| c.tenant_id == tenant_id);
        if !owned {
            return Err(RosterError::NotFound {
                entity: "Client",
                id: entry.client_id,
            });
        }
        inner
            .budgets
            .insert((entry.client_id, entry.category), entry);
        Ok(())
    }

    /// Lists the budget entries for a client under the given tenant.
    pub fn list_budgets(
        &self,
        tenant_id: Uuid,
        client_id: Uuid,
    ) -> RosterResult<Vec<BudgetLedgerEntry>> {
        let inner = self.read();
        let owned = inner
            .clients
            .get(&client_id)
            .is_some_and(|c| c.tenant_id == tenant_id);
        if !owned {
            return Err(RosterError::NotFound {
                entity: "Client",
                id: client_id,
            });
        }
        let mut entries: Vec<BudgetLedgerEntry> = inner
            .budgets
            .values()
            .filter(|b| b.client_id == client_id)
            .cloned()
            .collect();
        entries.sort_by_key(|b| b.category.to_string());
        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Shifts
    // ------------------------------------------------------------------

    /// Inserts one shift row.
    ///
    /// Series expansion calls this once per occurrence; each insert is
    /// independent and there is no rollback across a series.
    pub fn insert_shift(&self, shift: ShiftInstance) {
        self.write().shifts.insert(shift.id, shift);
    }

    /// Fetches a shift under the given tenant.
    pub fn get_shift(&self, tenant_id: Uuid, shift_id: Uuid) -> RosterResult<ShiftInstance> {
        self.read()
            .shifts
            .get(&shift_id)
            .filter(|s| s.tenant_id == tenant_id)
            .cloned()
            .ok_or(RosterError::NotFound {
                entity: "Shift",
                id: shift_id,
            })
    }

    /// Lists the tenant's shifts ordered by start time.
    pub fn list_shifts(&self, tenant_id: Uuid) -> Vec<ShiftInstance> {
        let mut shifts: Vec<ShiftInstance> = self
            .read()
            .shifts
            .values()
            .filter(|s| s.tenant_id == tenant_id)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| s.start_time);
        shifts
    }

    /// Marks a shift completed and, when a charge is given, attempts the
    /// conditional budget deduction in the same critical section.
    ///
    /// The deduction either fully applies or leaves the balance untouched;
    /// an insufficient balance is reported in the outcome, not as an error.
    /// A client with no ledger entry for the category is treated as having
    /// a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown shift and `InvalidShift` when the
    /// shift is already completed.
    pub fn complete_shift(
        &self,
        tenant_id: Uuid,
        shift_id: Uuid,
        charge: Option<BudgetCharge>,
    ) -> RosterResult<(ShiftInstance, Option<DeductionOutcome>)> {
        let mut inner = self.write();

        let shift = inner
            .shifts
            .get(&shift_id)
            .filter(|s| s.tenant_id == tenant_id)
            .ok_or(RosterError::NotFound {
                entity: "Shift",
                id: shift_id,
            })?;
        if shift.status == ShiftStatus::Completed {
            return Err(RosterError::InvalidShift {
                shift_id,
                message: "shift is already completed".to_string(),
            });
        }
        let client_id = shift.client_id;

        let outcome = match (charge, client_id) {
            (Some(charge), Some(client_id)) => {
                let key = (client_id, charge.category);
                match inner.budgets.get_mut(&key) {
                    Some(entry) if entry.remaining >= charge.cost => {
                        entry.remaining -= charge.cost;
                        entry.note = charge.note;
                        Some(DeductionOutcome::Applied {
                            new_balance: entry.remaining,
                        })
                    }
                    Some(entry) => Some(DeductionOutcome::InsufficientBalance {
                        remaining: entry.remaining,
                        required: charge.cost,
                    }),
                    None => Some(DeductionOutcome::InsufficientBalance {
                        remaining: Decimal::ZERO,
                        required: charge.cost,
                    }),
                }
            }
            _ => None,
        };

        // The shift completes regardless of the deduction outcome.
        let shift = inner
            .shifts
            .get_mut(&shift_id)
            .ok_or(RosterError::NotFound {
                entity: "Shift",
                id: shift_id,
            })?;
        shift.status = ShiftStatus::Completed;

        Ok((shift.clone(), outcome))
    }
}
