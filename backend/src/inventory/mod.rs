//! In-memory inventory and the rules derived from it.
//!
//! Everything here is synchronous and takes the current date or instant as an
//! argument, so the HTTP layer decides what "now" is.

pub mod alerts;
pub mod assets;
pub mod depreciation;
pub mod identifiers;
pub mod keys;
pub mod reports;
pub mod scope;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};
use crate::models::{Asset, Key, User};

pub use alerts::{upcoming_alerts, Alert, AlertKind};
pub use assets::AssetCreated;
pub use depreciation::{depreciation, Depreciation};
pub use scope::visible_to;
pub use search::search;

/// Calendar dates are compared as UTC midnight.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Inventory {
    pub assets: Vec<Asset>,
    pub keys: Vec<Key>,
    pub users: Vec<User>,
}

impl Inventory {
    pub fn new(assets: Vec<Asset>, keys: Vec<Key>, users: Vec<User>) -> Self {
        Self { assets, keys, users }
    }

    pub fn user(&self, id: &str) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| InventoryError::UserNotFound(id.to_string()))
    }

    pub fn visible_assets(&self, user: &User) -> Vec<&Asset> {
        scope::visible_to(&self.assets, user)
    }

    /// Looks an asset up by identifier; assets outside the user's scope do not exist for them.
    pub fn visible_asset(&self, user: &User, id: &str) -> Result<&Asset> {
        self.assets
            .iter()
            .find(|a| a.id == id && scope::can_see(user, a))
            .ok_or_else(|| InventoryError::AssetNotFound(id.to_string()))
    }

    pub(crate) fn visible_asset_mut(&mut self, user: &User, id: &str) -> Result<&mut Asset> {
        self.assets
            .iter_mut()
            .find(|a| a.id == id && scope::can_see(user, a))
            .ok_or_else(|| InventoryError::AssetNotFound(id.to_string()))
    }

    pub fn key(&self, id: &str) -> Result<&Key> {
        self.keys
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| InventoryError::KeyNotFound(id.to_string()))
    }

    pub(crate) fn key_mut(&mut self, id: &str) -> Result<&mut Key> {
        self.keys
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| InventoryError::KeyNotFound(id.to_string()))
    }

    /// Resolves a scanned code to an asset.
    ///
    /// The code is tried as identifier, then serial number, then barcode, then
    /// QR code; the first kind that matches any visible asset wins.
    pub fn find_by_scan(&self, user: &User, code: &str) -> Result<&Asset> {
        let code = code.trim();
        let visible = self.visible_assets(user);
        let matchers: [fn(&Asset, &str) -> bool; 4] = [
            |a, c| a.id == c,
            |a, c| !a.serial_number.is_empty() && a.serial_number == c,
            |a, c| a.matches_barcode(c),
            |a, c| a.matches_qr_code(c),
        ];

        matchers
            .iter()
            .find_map(|matches| visible.iter().copied().find(|a| matches(a, code)))
            .ok_or_else(|| InventoryError::AssetNotFound(code.to_string()))
    }

    pub fn find_key_by_rfid(&self, rfid: &str) -> Result<&Key> {
        let rfid = rfid.trim();
        self.keys
            .iter()
            .find(|k| k.rfid.as_deref() == Some(rfid))
            .ok_or_else(|| InventoryError::KeyNotFound(rfid.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::{admin, ana, it_asset, vehicle};
    use crate::models::Identifiers;

    #[test]
    fn scan_prefers_identifier_over_other_codes() {
        let mut first = it_asset("IT-001", "Ana Silva");
        first.identifiers = Some(Identifiers {
            barcode: Some("IT-002".into()),
            ..Identifiers::default()
        });
        let second = it_asset("IT-002", "Ana Silva");
        let inventory = Inventory::new(vec![first, second], vec![], vec![admin()]);

        assert_eq!(inventory.find_by_scan(&admin(), "IT-002").map(|a| a.id.as_str()), Ok("IT-002"));
    }

    #[test]
    fn scan_falls_back_to_serial_barcode_and_qr() {
        let mut asset = it_asset("IT-001", "Ana Silva");
        asset.serial_number = "DXPS15-9510-12345".into();
        asset.identifiers = Some(Identifiers {
            rfid: None,
            barcode: Some("7891234567890".into()),
            qr_code: Some("QR-IT-001".into()),
        });
        let inventory = Inventory::new(vec![asset], vec![], vec![admin()]);

        for code in ["DXPS15-9510-12345", "7891234567890", " QR-IT-001 "] {
            assert_eq!(inventory.find_by_scan(&admin(), code).map(|a| a.id.as_str()), Ok("IT-001"));
        }
    }

    #[test]
    fn scan_of_unknown_or_hidden_code_is_not_found() {
        let inventory = Inventory::new(vec![vehicle("VEH-001", "Roberto Lima")], vec![], vec![]);

        assert_eq!(
            inventory.find_by_scan(&admin(), "NOPE"),
            Err(InventoryError::AssetNotFound("NOPE".into()))
        );
        assert!(inventory.find_by_scan(&ana(), "VEH-001").is_err());
    }
}
