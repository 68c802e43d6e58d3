//! Check-out and check-in of assets between holders and storage.

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use tracing::warn;

use super::{current_user, respond};
use crate::database::Database;
use crate::models::{CheckInRequest, CheckOutRequest};

pub async fn check_out(
    db: web::Data<Database>,
    id: web::Path<String>,
    request: web::Json<CheckOutRequest>,
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

    let result = inventory.check_out(&user, &id, request.into_inner(), Utc::now().date_naive());
    if let Err(e) = &result {
        warn!("Check-out of {} by {} rejected: {}", id, user.name, e);
    }
    respond(result)
}

pub async fn check_in(
    db: web::Data<Database>,
    id: web::Path<String>,
    request: web::Json<CheckInRequest>,
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

    let result = inventory.check_in(&user, &id, request.into_inner(), Utc::now().date_naive());
    if let Err(e) = &result {
        warn!("Check-in of {} by {} rejected: {}", id, user.name, e);
    }
    respond(result)
}
