use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use super::{current_user, respond, DeleteQuery};
use crate::database::Database;
use crate::error::InventoryError;
use crate::inventory::{depreciation, search};
use crate::models::{
    Asset, AssetCategory, AssetEdit, NewAsset, NewContract, NewFuelLog, NewMaintenance, StatusChange,
};

#[derive(Deserialize, Debug, Default)]
pub struct AssetQuery {
    /// Free-text search over name, identifier and location.
    pub q: Option<String>,
    pub category: Option<AssetCategory>,
    /// Exact physical location.
    pub location: Option<String>,
}

pub async fn get_assets(
    db: web::Data<Database>,
    query: web::Query<AssetQuery>,
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
    let assets: Vec<&Asset> = search(&visible, query.q.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|a| query.category.map_or(true, |category| a.category() == category))
        .filter(|a| {
            query
                .location
                .as_deref()
                .map_or(true, |location| a.location.physical_location == location)
        })
        .collect();

    HttpResponse::Ok().json(assets)
}

pub async fn create_asset(
    db: web::Data<Database>,
    asset: web::Json<NewAsset>,
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

    match inventory.create_asset(&user, asset.into_inner(), Utc::now().date_naive()) {
        Ok(created) => HttpResponse::Created().json(created),
        Err(e) => {
            warn!("Asset creation rejected: {}", e);
            e.error_response()
        }
    }
}

pub async fn get_asset(
    db: web::Data<Database>,
    id: web::Path<String>,
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
    respond(inventory.visible_asset(&user, &id))
}

/// Stores the full record sent by the client. The path identifier wins over the body's.
pub async fn replace_asset(
    db: web::Data<Database>,
    id: web::Path<String>,
    asset: web::Json<Asset>,
    req: HttpRequest,
) -> HttpResponse {
    let user = match current_user(&req, &db) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let mut asset = asset.into_inner();
    asset.id = id.into_inner();

    let mut inventory = match db.write() {
        Ok(inventory) => inventory,
        Err(e) => return e.error_response(),
    };
    respond(inventory.replace_asset(&user, asset))
}

pub async fn edit_asset(
    db: web::Data<Database>,
    id: web::Path<String>,
    edit: web::Json<AssetEdit>,
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
    respond(inventory.edit_asset(&user, &id, edit.into_inner(), Utc::now().date_naive()))
}

pub async fn delete_asset(
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
    match inventory.delete_asset(&user, &id) {
        Ok(asset) => {
            info!("Asset {} ({}) removed from inventory", asset.id, asset.name);
            HttpResponse::NoContent().finish()
        }
        Err(e) => e.error_response(),
    }
}

pub async fn change_status(
    db: web::Data<Database>,
    id: web::Path<String>,
    change: web::Json<StatusChange>,
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
    respond(inventory.change_status(&user, &id, change.status, Utc::now().date_naive()))
}

pub async fn audit_asset(
    db: web::Data<Database>,
    id: web::Path<String>,
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
    respond(inventory.audit_asset(&user, &id, Utc::now().date_naive()))
}

pub async fn record_maintenance(
    db: web::Data<Database>,
    id: web::Path<String>,
    maintenance: web::Json<NewMaintenance>,
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
    respond(inventory.record_maintenance(&user, &id, maintenance.into_inner(), Utc::now().date_naive()))
}

pub async fn log_fuel(
    db: web::Data<Database>,
    id: web::Path<String>,
    fuel: web::Json<NewFuelLog>,
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
    respond(inventory.log_fuel(&user, &id, fuel.into_inner(), Utc::now().date_naive()))
}

pub async fn add_contract(
    db: web::Data<Database>,
    id: web::Path<String>,
    contract: web::Json<NewContract>,
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
    respond(inventory.add_contract(&user, &id, contract.into_inner(), Utc::now().date_naive()))
}

pub async fn get_depreciation(
    db: web::Data<Database>,
    id: web::Path<String>,
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
    respond(
        inventory
            .visible_asset(&user, &id)
            .map(|asset| depreciation(asset, Utc::now())),
    )
}
