pub mod allocation;
pub mod assets;
pub mod keys;
pub mod reports;

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::database::Database;
use crate::error::Result;
use crate::models::User;

/// Header carrying the identifier of the acting user.
pub const USER_HEADER: &str = "X-User-Id";

/// Query string of the irreversible delete endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// Resolves the acting user from the request headers.
pub fn current_user(req: &HttpRequest, db: &Database) -> std::result::Result<User, HttpResponse> {
    let user_id = match req.headers().get(USER_HEADER).map(|v| v.to_str()) {
        Some(Ok(id)) if !id.trim().is_empty() => id.trim().to_string(),
        Some(_) => return Err(HttpResponse::Unauthorized().json("Invalid user header")),
        None => return Err(HttpResponse::Unauthorized().json("User header required")),
    };

    let user = db
        .read()
        .map_err(|e| e.error_response())?
        .user(&user_id)
        .map(User::clone);
    match user {
        Ok(user) => Ok(user),
        Err(_) => {
            warn!("Request from unknown user {}", user_id);
            Err(HttpResponse::Unauthorized().json("Unknown user"))
        }
    }
}

/// Maps a domain result onto a JSON response, logging the failures.
pub(crate) fn respond<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            debug!("Request rejected: {}", e);
            e.error_response()
        }
    }
}

pub async fn health_check(db: web::Data<Database>) -> HttpResponse {
    match db.get_stats() {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "message": "Asset Inventory API",
            "version": env!("CARGO_PKG_VERSION"),
            "records": stats,
        })),
        Err(e) => e.error_response(),
    }
}

pub async fn get_users(db: web::Data<Database>, req: HttpRequest) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    match db.read() {
        Ok(inventory) => HttpResponse::Ok().json(&inventory.users),
        Err(e) => e.error_response(),
    }
}

pub async fn get_me(db: web::Data<Database>, req: HttpRequest) -> HttpResponse {
    match current_user(&req, &db) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(response) => response,
    }
}

/// Registers every route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/users", web::get().to(get_users))
            .route("/me", web::get().to(get_me))
            .route("/assets", web::get().to(assets::get_assets))
            .route("/assets", web::post().to(assets::create_asset))
            .route("/assets/{id}", web::get().to(assets::get_asset))
            .route("/assets/{id}", web::put().to(assets::replace_asset))
            .route("/assets/{id}", web::patch().to(assets::edit_asset))
            .route("/assets/{id}", web::delete().to(assets::delete_asset))
            .route("/assets/{id}/status", web::post().to(assets::change_status))
            .route("/assets/{id}/audit", web::post().to(assets::audit_asset))
            .route("/assets/{id}/checkout", web::post().to(allocation::check_out))
            .route("/assets/{id}/checkin", web::post().to(allocation::check_in))
            .route("/assets/{id}/maintenance", web::post().to(assets::record_maintenance))
            .route("/assets/{id}/fuel", web::post().to(assets::log_fuel))
            .route("/assets/{id}/contracts", web::post().to(assets::add_contract))
            .route("/assets/{id}/depreciation", web::get().to(assets::get_depreciation))
            .route("/scan/{code}", web::get().to(reports::scan))
            .route("/scan/{code}/audit", web::post().to(reports::scan_and_audit))
            .route("/locations", web::get().to(reports::get_locations))
            .route("/alerts", web::get().to(reports::get_alerts))
            .route("/dashboard", web::get().to(reports::get_dashboard))
            .route("/reports", web::get().to(reports::get_report))
            .route("/reports/export.csv", web::get().to(reports::export_report))
            .route("/keys", web::get().to(keys::get_keys))
            .route("/keys", web::post().to(keys::create_key))
            .route("/keys/stats", web::get().to(keys::get_key_stats))
            .route("/keys/rfid/{rfid}", web::get().to(keys::get_key_by_rfid))
            .route("/keys/{id}", web::get().to(keys::get_key))
            .route("/keys/{id}", web::put().to(keys::replace_key))
            .route("/keys/{id}", web::patch().to(keys::edit_key))
            .route("/keys/{id}", web::delete().to(keys::delete_key))
            .route("/keys/{id}/checkout", web::post().to(keys::check_out))
            .route("/keys/{id}/checkin", web::post().to(keys::check_in))
            .route("/keys/{id}/lost", web::post().to(keys::report_lost)),
    );
}
