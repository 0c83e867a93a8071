//! Request and response shapes for the leads API.

use serde::{Deserialize, Serialize};

use crate::bulk::BulkOperationResult;
use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::filter::FilterCriteria;
use crate::notify::Notification;
use crate::pagination::Paginated;

/// Query parameters accepted by the lead list.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListQuery {
    /// Free-text search over names, email, phone and source.
    pub q: Option<String>,
    /// Status to keep; blank or `all` keeps every status.
    pub status: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// One page of the filtered lead list.
#[derive(Debug, Serialize)]
pub struct LeadListPage {
    /// Number of leads matching the criteria across all pages.
    pub total: usize,
    pub leads: Paginated<Lead>,
    /// Criteria echoed back to the client.
    pub criteria: FilterCriteria,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub result: BulkOperationResult<LeadId>,
    /// Exactly one summary notification.
    pub alerts: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub created: usize,
}
