//! Lead list, CRUD and bulk workflows.

use tokio_util::sync::CancellationToken;

use crate::bulk::{BulkCoordinator, BulkOperationResult};
use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::dto::leads::{LeadListPage, LeadListQuery};
use crate::filter::{FilterCriteria, filter_leads};
use crate::forms::bulk::{BulkDeleteForm, BulkDeletePayload};
use crate::forms::import::parse_leads_csv;
use crate::forms::lead::{LeadForm, LeadPayload};
use crate::notify::{LogNotifier, report_bulk_outcome};
use crate::pagination::Paginated;
use crate::repository::{LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Fetches every lead and returns the requested page of the filtered view.
pub fn list_leads<R>(repo: &R, query: LeadListQuery, per_page: usize) -> ServiceResult<LeadListPage>
where
    R: LeadReader + ?Sized,
{
    let criteria = FilterCriteria::from_input(query.q.as_deref(), query.status.as_deref())?;

    let all = repo.list_leads().map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;

    let visible = filter_leads(&all, &criteria);
    let total = visible.len();
    let leads = Paginated::slice(visible, query.page.unwrap_or(1), per_page);

    Ok(LeadListPage {
        total,
        leads,
        criteria,
    })
}

pub fn get_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    let id = LeadId::new(lead_id)?;
    repo.get_lead_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Validates the form and persists a new lead.
pub fn create_lead<R>(repo: &R, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let payload = LeadPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        err
    })?;

    let lead = repo.create_lead(&payload.into_new_lead()).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        err
    })?;

    log::info!("Created lead {}", lead.id);
    Ok(lead)
}

/// Replaces the editable fields of an existing lead.
pub fn update_lead<R>(repo: &R, lead_id: i32, form: LeadForm) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let id = LeadId::new(lead_id)?;
    let payload = LeadPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        err
    })?;

    repo.update_lead(id, &payload.into_update()).map_err(|err| {
        log::error!("Failed to update lead {id}: {err}");
        ServiceError::from(err)
    })
}

/// Stores a copy of an existing lead under a new id.
pub fn duplicate_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let original = get_lead(repo, lead_id)?;

    let copy = repo.create_lead(&original.duplicate()).map_err(|err| {
        log::error!("Failed to duplicate lead {}: {err}", original.id);
        err
    })?;

    log::info!("Duplicated lead {} as {}", original.id, copy.id);
    Ok(copy)
}

pub fn delete_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    let id = LeadId::new(lead_id)?;
    repo.delete_lead(id)?;
    log::info!("Deleted lead {id}");
    Ok(())
}

/// Deletes the selected leads one at a time.
///
/// Only an invalid selection is returned as an error; failures of individual
/// deletions are reported inside the result so the caller can retry them.
pub async fn bulk_delete_leads<R>(
    repo: &R,
    form: BulkDeleteForm,
    max_ids: usize,
    cancel: Option<CancellationToken>,
) -> ServiceResult<BulkOperationResult<LeadId>>
where
    R: LeadWriter + ?Sized,
{
    let payload = BulkDeletePayload::parse(form, max_ids).map_err(|err| {
        log::error!("Rejected bulk delete: {err}");
        err
    })?;

    let mut coordinator = BulkCoordinator::new();
    if let Some(token) = cancel {
        coordinator = coordinator.with_cancellation(token);
    }

    let result = coordinator
        .run(&payload.ids, move |id| async move { repo.delete_lead(id) })
        .await;
    report_bulk_outcome(&result, &mut LogNotifier, "Bulk delete");

    Ok(result)
}

/// Parses an uploaded CSV file and creates the leads in one batch.
pub fn import_leads<R>(repo: &R, data: &[u8]) -> ServiceResult<usize>
where
    R: LeadWriter + ?Sized,
{
    let leads = parse_leads_csv(data).map_err(|err| {
        log::error!("Failed to parse leads: {err}");
        err
    })?;

    if leads.is_empty() {
        return Ok(0);
    }

    let created = repo.create_leads(&leads).map_err(|err| {
        log::error!("Failed to import leads: {err}");
        err
    })?;

    log::info!("Imported {created} leads");
    Ok(created)
}
