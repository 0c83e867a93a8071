//! HTTP handlers for the JSON API.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod leads;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps a service failure onto an HTTP response.
pub fn error_response(err: &ServiceError) -> HttpResponse {
    let body = ErrorBody {
        error: err.to_string(),
    };
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::Internal(message) => {
            log::error!("Request failed: {message}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Registers the lead endpoints; mounted under `/api` by [`crate::run`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(leads::list_leads)
        .service(leads::create_lead)
        .service(leads::bulk_delete_leads)
        .service(leads::import_leads)
        .service(leads::show_lead)
        .service(leads::update_lead)
        .service(leads::duplicate_lead)
        .service(leads::delete_lead);
}
