//! Persistence boundary for leads.
//!
//! Services depend on the [`LeadReader`] and [`LeadWriter`] traits; the
//! Diesel-backed [`DieselRepository`] is the production implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::lead::{Lead, NewLead, UpdateLead};
use crate::domain::types::LeadId;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod lead;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel repository shared across handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    /// Returns every lead, ordered by id.
    fn list_leads(&self) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    fn update_lead(&self, id: LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
    /// Deletes one lead; `NotFound` when nothing was deleted.
    fn delete_lead(&self, id: LeadId) -> RepositoryResult<()>;
}
