//! Read-side views over the visible inventory: alerts, dashboard, reports and scanning.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use tracing::{debug, info};

use super::{current_user, respond};
use crate::config::AppConfig;
use crate::database::Database;
use crate::inventory::reports::{self, ReportFilter};
use crate::inventory::upcoming_alerts;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const CSV_FILENAME: &str = "asset-report.csv";

pub async fn get_alerts(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };

    let alerts = upcoming_alerts(&inventory.visible_assets(&user), Utc::now(), config.alert_window());
    debug!("{} alerts for {}", alerts.len(), user.name);
    HttpResponse::Ok().json(alerts)
}

pub async fn get_dashboard(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };

    let summary = reports::dashboard(&inventory.visible_assets(&user), Utc::now(), config.alert_window());
    HttpResponse::Ok().json(summary)
}

pub async fn get_report(
    db: web::Data<Database>,
    filter: web::Query<ReportFilter>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };

    let visible = inventory.visible_assets(&user);
    HttpResponse::Ok().json(reports::filter_report(&visible, &filter))
}

pub async fn export_report(
    db: web::Data<Database>,
    filter: web::Query<ReportFilter>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };

    let visible = inventory.visible_assets(&user);
    let rows = reports::filter_report(&visible, &filter);
    info!("{} exported a report of {} assets", user.name, rows.len());

    HttpResponse::Ok()
        .content_type(CSV_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CSV_FILENAME),
        ))
        .body(reports::export_csv(&rows))
}

/// Distinct physical locations of the visible assets, for the inventory view.
pub async fn get_locations(db: web::Data<Database>, req: HttpRequest) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    HttpResponse::Ok().json(reports::locations(&inventory.visible_assets(&user)))
}

pub async fn scan(db: web::Data<Database>, code: web::Path<String>, req: HttpRequest) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.find_by_scan(&user, &code))
}

/// Resolves a scanned code and marks the asset as audited today.
pub async fn scan_and_audit(
    db: web::Data<Database>,
    code: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };

    let id = match inventory.find_by_scan(&user, &code) {
        Ok(asset) => asset.id.clone(),
        Err(e) => return e.error_response(),
    };
    respond(inventory.audit_asset(&user, &id, Utc::now().date_naive()))
}
