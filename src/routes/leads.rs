use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::leads::{BulkDeleteResponse, ImportResponse, LeadListQuery};
use crate::forms::bulk::BulkDeleteForm;
use crate::forms::lead::LeadForm;
use crate::models::config::ServerConfig;
use crate::notify::{NotificationBuffer, report_bulk_outcome};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::leads as service;

#[get("/v1/leads")]
pub async fn list_leads(
    params: web::Query<LeadListQuery>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match service::list_leads(
        repo.get_ref(),
        params.into_inner(),
        server_config.items_per_page,
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err),
    }
}

#[get("/v1/leads/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_lead(repo.get_ref(), lead_id.into_inner()) {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/leads")]
pub async fn create_lead(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LeadForm>,
) -> impl Responder {
    match service::create_lead(repo.get_ref(), form) {
        Ok(lead) => HttpResponse::Created().json(lead),
        Err(err) => error_response(&err),
    }
}

#[put("/v1/leads/{lead_id}")]
pub async fn update_lead(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LeadForm>,
) -> impl Responder {
    match service::update_lead(repo.get_ref(), lead_id.into_inner(), form) {
        Ok(lead) => HttpResponse::Ok().json(lead),
        Err(err) => error_response(&err),
    }
}

#[post("/v1/leads/{lead_id}/duplicate")]
pub async fn duplicate_lead(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::duplicate_lead(repo.get_ref(), lead_id.into_inner()) {
        Ok(lead) => HttpResponse::Created().json(lead),
        Err(err) => error_response(&err),
    }
}

#[delete("/v1/leads/{lead_id}")]
pub async fn delete_lead(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::delete_lead(repo.get_ref(), lead_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err),
    }
}

/// Deletes the selected leads; answers 207 when some deletions failed.
#[post("/v1/leads/bulk-delete")]
pub async fn bulk_delete_leads(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<BulkDeleteForm>,
) -> impl Responder {
    let result = match service::bulk_delete_leads(
        repo.get_ref(),
        form,
        server_config.max_bulk_ids,
        None,
    )
    .await
    {
        Ok(result) => result,
        Err(err) => return error_response(&err),
    };

    let mut alerts = NotificationBuffer::new();
    report_bulk_outcome(&result, &mut alerts, "Deleted leads");

    let body = BulkDeleteResponse {
        alerts: alerts.into_inner(),
        result,
    };
    if body.result.is_complete_success() {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::MultiStatus().json(body)
    }
}

#[post("/v1/leads/import")]
pub async fn import_leads(repo: web::Data<DieselRepository>, body: web::Bytes) -> impl Responder {
    match service::import_leads(repo.get_ref(), &body) {
        Ok(created) => HttpResponse::Ok().json(ImportResponse { created }),
        Err(err) => error_response(&err),
    }
}
