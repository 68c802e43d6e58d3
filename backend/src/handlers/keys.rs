use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use tracing::{info, warn};

use super::{current_user, respond, DeleteQuery};
use crate::config::AppConfig;
use crate::database::Database;
use crate::error::InventoryError;
use crate::inventory::reports::key_stats;
use crate::models::{Key, KeyCheckOut, KeyEdit, NewKey};

pub async fn get_keys(db: web::Data<Database>, req: HttpRequest) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    HttpResponse::Ok().json(&inventory.keys)
}

pub async fn get_key_stats(db: web::Data<Database>, req: HttpRequest) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    HttpResponse::Ok().json(key_stats(&inventory.keys))
}

pub async fn get_key(db: web::Data<Database>, id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.key(&id))
}

/// Looks a key up by the tag read from its RFID fob.
pub async fn get_key_by_rfid(
    db: web::Data<Database>,
    rfid: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    let inventory = match db.read() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.find_key_by_rfid(&rfid))
}

pub async fn create_key(
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
    key: web::Json<NewKey>,
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

    match inventory.create_key(&user, key.into_inner(), &config.key_storage_point, Utc::now().date_naive()) {
        Ok(key) => HttpResponse::Created().json(key),
        Err(e) => {
            warn!("Key registration by {} rejected: {}", user.name, e);
            e.error_response()
        }
    }
}

pub async fn replace_key(
    db: web::Data<Database>,
    id: web::Path<String>,
    key: web::Json<Key>,
    req: HttpRequest,
) -> HttpResponse {
    if let Err(response) = current_user(&req, &db) {
        return response;
    }
    let mut key = key.into_inner();
    key.id = id.into_inner();

    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.replace_key(key))
}

pub async fn edit_key(
    db: web::Data<Database>,
    id: web::Path<String>,
    edit: web::Json<KeyEdit>,
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
    respond(inventory.edit_key(&user, &id, edit.into_inner(), Utc::now().date_naive()))
}

pub async fn delete_key(
    db: web::Data<Database>,
    id: web::Path<String>,
    query: web::Query<DeleteQuery>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    if !query.confirm {
        return InventoryError::ConfirmationRequired(id.into_inner()).error_response();
    }

    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    match inventory.delete_key(&user, &id) {
        Ok(key) => {
            info!("Key {} ({}) removed", key.id, key.name);
            HttpResponse::NoContent().finish()
        }
        Err(e) => e.error_response(),
    }
}

pub async fn check_out(
    db: web::Data<Database>,
    id: web::Path<String>,
    request: web::Json<KeyCheckOut>,
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
    respond(inventory.check_out_key(&user, &id, request.into_inner(), Utc::now().date_naive()))
}

pub async fn check_in(db: web::Data<Database>, id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.check_in_key(&user, &id, Utc::now().date_naive()))
}

pub async fn report_lost(db: web::Data<Database>, id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.report_key_lost(&user, &id, Utc::now().date_naive()))
}
