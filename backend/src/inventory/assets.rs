//! Asset mutations. Each one appends to the asset's history except the raw replace,
//! which may only extend it.

use std::mem;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::identifiers::{self, CONTRACT_PREFIX, FUEL_LOG_PREFIX, MAINTENANCE_PREFIX};
use super::Inventory;
use crate::error::{InventoryError, Result};
use crate::models::{
    Allocation, Asset, AssetCategory, AssetDetails, AssetEdit, AssetStatus, CheckInRequest,
    CheckOutRequest, Contract, FuelLog, HistoryEntry, Location, Maintenance, NewAsset,
    NewContract, NewFuelLog, NewMaintenance, User, NO_RESPONSIBLE,
};

#[derive(Serialize, Debug)]
pub struct AssetCreated {
    pub asset: Asset,
    /// List view the client should switch to.
    pub view: &'static str,
}

impl Inventory {
    pub fn create_asset(&mut self, actor: &User, new: NewAsset, today: NaiveDate) -> Result<AssetCreated> {
        if new.name.trim().is_empty() {
            return Err(InventoryError::Validation("name"));
        }

        let category = new.details.category();
        let id = identifiers::next_identifier(
            category.prefix(),
            self.assets
                .iter()
                .filter(|a| a.category() == category)
                .map(|a| a.id.as_str()),
        );

        let responsible = match new.location.responsible.trim() {
            "" => NO_RESPONSIBLE,
            name => name,
        };
        let created = HistoryEntry::new(today, &actor.name, "Asset created").with_details(format!(
            "Assigned to {} at {}",
            responsible, new.location.physical_location
        ));

        let asset = Asset {
            id,
            name: new.name,
            description: new.description,
            serial_number: new.serial_number,
            status: new.status,
            location: new.location,
            acquisition: new.acquisition,
            identifiers: new.identifiers,
            history: vec![created],
            allocation_history: Vec::new(),
            contracts: new.contracts,
            photo_url: new.photo_url,
            documents: new.documents,
            last_audited_date: None,
            details: new.details,
        };

        info!("Asset {} created by {}", asset.id, actor.name);
        self.assets.push(asset.clone());

        Ok(AssetCreated {
            asset,
            view: category.list_view(),
        })
    }

    /// Replaces the stored record. The category is fixed at creation, the history
    /// may only gain entries and the allocation history is owned by check-out/check-in.
    pub fn replace_asset(&mut self, actor: &User, mut asset: Asset) -> Result<&Asset> {
        let slot = self.visible_asset_mut(actor, &asset.id)?;
        let category = slot.category();
        if asset.category() != category {
            return Err(InventoryError::CategoryMismatch {
                id: asset.id,
                expected: category,
            });
        }
        if !asset.history.starts_with(&slot.history) {
            warn!("Rejected replacement of {} rewriting its history", asset.id);
            return Err(InventoryError::HistoryRewritten(asset.id));
        }

        asset.allocation_history = mem::take(&mut slot.allocation_history);
        *slot = asset;
        Ok(slot)
    }

    /// Applies an edit-save and records one history entry naming the fields that changed.
    pub fn edit_asset(&mut self, actor: &User, id: &str, edit: AssetEdit, today: NaiveDate) -> Result<&Asset> {
        if edit.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(InventoryError::Validation("name"));
        }
        let asset = self.visible_asset_mut(actor, id)?;
        let mut changes = Vec::new();

        apply_change(&mut asset.name, edit.name, "name", &mut changes);
        apply_change(&mut asset.description, edit.description, "description", &mut changes);
        apply_change(&mut asset.serial_number, edit.serial_number, "serial number", &mut changes);
        apply_change(
            &mut asset.location.physical_location,
            edit.physical_location,
            "location",
            &mut changes,
        );
        apply_change(
            &mut asset.location.responsible,
            edit.responsible,
            "responsible",
            &mut changes,
        );

        if changes.is_empty() {
            debug!("Edit of {} changed nothing", id);
        } else {
            asset.history.push(
                HistoryEntry::new(today, &actor.name, "Asset edited")
                    .with_details(format!("Changed {}", changes.join("; "))),
            );
        }
        Ok(asset)
    }

    pub fn delete_asset(&mut self, actor: &User, id: &str) -> Result<Asset> {
        let position = self
            .assets
            .iter()
            .position(|a| a.id == id && super::scope::can_see(actor, a))
            .ok_or_else(|| InventoryError::AssetNotFound(id.to_string()))?;
        info!("Asset {} deleted by {}", id, actor.name);
        Ok(self.assets.remove(position))
    }

    /// Confirms the asset is physically where the records say it is.
    pub fn audit_asset(&mut self, actor: &User, id: &str, today: NaiveDate) -> Result<&Asset> {
        let asset = self.visible_asset_mut(actor, id)?;
        asset.last_audited_date = Some(today);
        asset
            .history
            .push(HistoryEntry::new(today, &actor.name, "Audited"));
        Ok(asset)
    }

    pub fn check_out(
        &mut self,
        actor: &User,
        id: &str,
        request: CheckOutRequest,
        today: NaiveDate,
    ) -> Result<&Asset> {
        let location = request.location.trim();
        if location.is_empty() {
            return Err(InventoryError::Validation("location"));
        }
        let responsible = match request.responsible.trim() {
            "" => format!("Common Use - {}", location),
            name => name.to_string(),
        };

        let asset = self.visible_asset_mut(actor, id)?;
        asset.status = AssetStatus::Active;
        asset.location = Location {
            physical_location: location.to_string(),
            responsible: responsible.clone(),
        };
        for open in asset.allocation_history.iter_mut().filter(|a| a.is_open()) {
            open.end_date = Some(today);
        }
        asset
            .allocation_history
            .push(Allocation::open(responsible.clone(), today));
        asset.history.push(
            HistoryEntry::new(today, &actor.name, "Check-out")
                .with_details(format!("Assigned to {} at {}", responsible, location)),
        );

        info!("Asset {} checked out to {}", id, responsible);
        Ok(asset)
    }

    pub fn check_in(
        &mut self,
        actor: &User,
        id: &str,
        request: CheckInRequest,
        today: NaiveDate,
    ) -> Result<&Asset> {
        let storage = request.storage_location.trim();
        if storage.is_empty() {
            return Err(InventoryError::Validation("storage_location"));
        }

        let asset = self.visible_asset_mut(actor, id)?;
        let previous = release_custody(asset, today);
        asset.location.physical_location = storage.to_string();
        asset.history.push(
            HistoryEntry::new(today, &actor.name, "Check-in")
                .with_details(format!("Returned by {} to {}", previous, storage)),
        );

        info!("Asset {} checked in to {}", id, storage);
        Ok(asset)
    }

    /// Sets any status from any status; the history keeps the trail. Moving an
    /// asset to stock releases its current holder.
    pub fn change_status(
        &mut self,
        actor: &User,
        id: &str,
        status: AssetStatus,
        today: NaiveDate,
    ) -> Result<&Asset> {
        let asset = self.visible_asset_mut(actor, id)?;
        let previous = asset.status;
        if status == AssetStatus::InStock {
            release_custody(asset, today);
        }
        asset.status = status;
        asset.history.push(HistoryEntry::new(
            today,
            &actor.name,
            format!("Status changed from {} to {}", previous, status),
        ));
        Ok(asset)
    }

    pub fn record_maintenance(
        &mut self,
        actor: &User,
        id: &str,
        new: NewMaintenance,
        today: NaiveDate,
    ) -> Result<&Asset> {
        if new.kind.trim().is_empty() {
            return Err(InventoryError::Validation("type"));
        }
        let asset = self.visible_asset_mut(actor, id)?;
        let entry = Maintenance {
            id: identifiers::child_identifier(MAINTENANCE_PREFIX),
            date: new.date,
            kind: new.kind,
            description: new.description,
            cost: new.cost,
        };
        asset.history.push(
            HistoryEntry::new(today, &actor.name, "Maintenance recorded")
                .with_details(format!("{} on {}", entry.kind, entry.date)),
        );
        asset.details.maintenance_log_mut().push(entry);
        Ok(asset)
    }

    pub fn log_fuel(&mut self, actor: &User, id: &str, new: NewFuelLog, today: NaiveDate) -> Result<&Asset> {
        let asset = self.visible_asset_mut(actor, id)?;
        let AssetDetails::Vehicle { fuel_logs, .. } = &mut asset.details else {
            return Err(InventoryError::CategoryMismatch {
                id: id.to_string(),
                expected: AssetCategory::Vehicle,
            });
        };
        let details = format!("{:.2}L for {:.2}", new.liters, new.cost);
        fuel_logs.push(FuelLog {
            id: identifiers::child_identifier(FUEL_LOG_PREFIX),
            date: new.date,
            cost: new.cost,
            liters: new.liters,
            station: new.station,
            odometer: new.odometer,
        });
        asset
            .history
            .push(HistoryEntry::new(today, &actor.name, "Fuel logged").with_details(details));
        Ok(asset)
    }

    pub fn add_contract(&mut self, actor: &User, id: &str, new: NewContract, today: NaiveDate) -> Result<&Asset> {
        if new.supplier.trim().is_empty() {
            return Err(InventoryError::Validation("supplier"));
        }
        let asset = self.visible_asset_mut(actor, id)?;
        let contract = Contract {
            id: identifiers::child_identifier(CONTRACT_PREFIX),
            kind: new.kind,
            supplier: new.supplier,
            start_date: new.start_date,
            end_date: new.end_date,
            details: new.details,
        };
        asset.history.push(
            HistoryEntry::new(today, &actor.name, "Contract added").with_details(format!(
                "{} with {} until {}",
                contract.kind, contract.supplier, contract.end_date
            )),
        );
        asset.contracts.push(contract);
        Ok(asset)
    }
}

/// Puts the asset in stock with no responsible and closes the most recent open
/// allocation. Returns who held it.
fn release_custody(asset: &mut Asset, today: NaiveDate) -> String {
    asset.status = AssetStatus::InStock;
    if let Some(open) = asset.allocation_history.iter_mut().rev().find(|a| a.is_open()) {
        open.end_date = Some(today);
    }
    mem::replace(&mut asset.location.responsible, NO_RESPONSIBLE.to_string())
}

fn apply_change(field: &mut String, value: Option<String>, label: &str, changes: &mut Vec<String>) {
    let Some(value) = value else {
        return;
    };
    if *field != value {
        changes.push(format!("{} from '{}' to '{}'", label, field, value));
        *field = value;
    }
}
