use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use leadboard::domain::lead::NewLead;
use leadboard::domain::types::LeadStatus;
use leadboard::models::config::ServerConfig;
use leadboard::repository::{DieselRepository, LeadReader, LeadWriter};
use leadboard::routes;
use serde_json::{Value, json};

mod common;

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: String::new(),
        max_bulk_ids: 3,
        items_per_page: 20,
    }
}

fn seed(repo: &DieselRepository) {
    let lead = |first: &str, status| {
        NewLead::new(
            Some(first.into()),
            None,
            Some(format!("{}@example.com", first.to_lowercase())),
            None,
            None,
            status,
            None,
        )
    };
    repo.create_leads(&[
        lead("Ann", LeadStatus::New),
        lead("Bob", LeadStatus::Qualified),
    ])
    .unwrap();
}

macro_rules! init_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(server_config()))
                .service(web::scope("/api").configure(routes::configure)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_list_leads_applies_query_and_status() {
    let test_db = common::TestDb::new("test_list_leads_route.db");
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::get().uri("/api/v1/leads?q=an").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["leads"]["items"][0]["first_name"], "Ann");
    assert_eq!(body["criteria"]["query"], "an");

    let req = test::TestRequest::get()
        .uri("/api/v1/leads?status=qualified")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["leads"]["items"][0]["first_name"], "Bob");

    let req = test::TestRequest::get()
        .uri("/api/v1/leads?status=archived")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_create_show_and_delete_lead() {
    let test_db = common::TestDb::new("test_create_lead_route.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads")
        .set_json(json!({
            "first_name": " Ann ",
            "email": "ANN@example.com",
            "status": "Contacted",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["first_name"], "Ann");
    assert_eq!(created["email"], "ann@example.com");
    assert_eq!(created["status"], "contacted");
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/leads/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/leads/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/leads/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_create_lead_rejects_invalid_email() {
    let test_db = common::TestDb::new("test_create_invalid_email.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads")
        .set_json(json!({ "first_name": "Ann", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(repo.list_leads().unwrap().is_empty());
}

#[actix_web::test]
async fn test_duplicate_lead_route() {
    let test_db = common::TestDb::new("test_duplicate_lead_route.db");
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads/2/duplicate")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let copy: Value = test::read_body_json(resp).await;
    assert_eq!(copy["id"], 3);
    assert_eq!(copy["first_name"], "Bob");
    assert_eq!(copy["status"], "qualified");
}

#[actix_web::test]
async fn test_update_lead_replaces_all_fields() {
    let test_db = common::TestDb::new("test_update_lead_route.db");
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::put()
        .uri("/api/v1/leads/2")
        .set_json(json!({ "first_name": "Robert", "phone": "+1 415 555 2671" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["first_name"], "Robert");
    assert_eq!(updated["phone"], "+14155552671");
    assert_eq!(updated["email"], Value::Null);
    assert_eq!(updated["status"], "new");

    let stored = repo.list_leads().unwrap();
    assert_eq!(stored[1].status, LeadStatus::New);
    assert_eq!(stored[1].email, None);

    let req = test::TestRequest::put()
        .uri("/api/v1/leads/2")
        .set_json(json!({ "email": "broken" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri("/api/v1/leads/42")
        .set_json(json!({ "first_name": "Nobody" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_bulk_delete_reports_partial_failure() {
    let test_db = common::TestDb::new("test_bulk_delete_route.db");
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads/bulk-delete")
        .set_json(json!({ "ids": [1, 99, 2] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::MULTI_STATUS);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["result"]["success_count"], 2);
    assert_eq!(body["result"]["failure_count"], 1);
    assert_eq!(body["result"]["failed_ids"], json!([99]));
    assert_eq!(body["alerts"].as_array().unwrap().len(), 1);
    assert_eq!(body["alerts"][0]["level"], "error");
    assert_eq!(body["alerts"][0]["class"], "danger");
    assert_eq!(
        body["alerts"][0]["message"],
        "Deleted leads: 2 succeeded, 1 failed (ids: 99)"
    );

    assert!(repo.list_leads().unwrap().is_empty());
}

#[actix_web::test]
async fn test_bulk_delete_success_and_rejected_selections() {
    let test_db = common::TestDb::new("test_bulk_delete_selection.db");
    let repo = DieselRepository::new(test_db.pool());
    seed(&repo);
    let app = init_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads/bulk-delete")
        .set_json(json!({ "ids": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads/bulk-delete")
        .set_json(json!({ "ids": [1, 2, 3, 4] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repo.list_leads().unwrap().len(), 2);

    let req = test::TestRequest::post()
        .uri("/api/v1/leads/bulk-delete")
        .set_json(json!({ "ids": [2] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["alerts"][0]["level"], "success");
    assert_eq!(body["alerts"][0]["message"], "Deleted leads: 1");
    assert_eq!(repo.list_leads().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_import_leads_from_csv() {
    let test_db = common::TestDb::new("test_import_leads_route.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo);

    let csv = "first_name,email,status\nAnn,ann@example.com,new\nBob,,lost\n";
    let req = test::TestRequest::post()
        .uri("/api/v1/leads/import")
        .insert_header(("Content-Type", "text/csv"))
        .set_payload(csv)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["created"], 2);

    let leads = repo.list_leads().unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[1].status, LeadStatus::Lost);
    assert_eq!(leads[1].email, None);
}

#[actix_web::test]
async fn test_import_rejects_invalid_rows() {
    let test_db = common::TestDb::new("test_import_invalid_rows.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_app!(repo);

    let csv = "first_name,email\nAnn,ann@example.com\nBob,not-an-email\n";
    let req = test::TestRequest::post()
        .uri("/api/v1/leads/import")
        .insert_header(("Content-Type", "text/csv"))
        .set_payload(csv)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("row 3"));
    assert!(repo.list_leads().unwrap().is_empty());
}
