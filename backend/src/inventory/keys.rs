//! Key custody: registration, check-out, check-in and loss.

use std::mem;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::identifiers::{self, KEY_PREFIX};
use super::Inventory;
use crate::error::{InventoryError, Result};
use crate::models::{
    HistoryEntry, Key, KeyCheckOut, KeyEdit, KeyLocation, KeyStatus, NewKey, User, NO_RESPONSIBLE,
};

fn blank_to_none(rfid: Option<String>) -> Option<String> {
    rfid.map(|tag| tag.trim().to_string()).filter(|tag| !tag.is_empty())
}

impl Inventory {
    /// Registers a key in the given storage point. Admin only.
    pub fn create_key(
        &mut self,
        actor: &User,
        new: NewKey,
        storage_point: &str,
        today: NaiveDate,
    ) -> Result<&Key> {
        if !actor.is_admin() {
            return Err(InventoryError::Forbidden("Only administrators can register keys"));
        }
        if new.name.trim().is_empty() {
            return Err(InventoryError::Validation("name"));
        }
        if new.description.trim().is_empty() {
            return Err(InventoryError::Validation("description"));
        }

        let id = identifiers::next_identifier(KEY_PREFIX, self.keys.iter().map(|k| k.id.as_str()));
        info!("Key {} registered by {}", id, actor.name);

        self.keys.push(Key {
            id,
            name: new.name,
            description: new.description,
            rfid: blank_to_none(new.rfid),
            status: KeyStatus::Available,
            location: KeyLocation {
                storage_point: storage_point.to_string(),
                responsible: NO_RESPONSIBLE.to_string(),
            },
            history: vec![HistoryEntry::new(today, &actor.name, "Key created")],
        });
        let created = self.keys.len() - 1;
        Ok(&self.keys[created])
    }

    /// Replaces the stored key. Its history may only gain entries.
    pub fn replace_key(&mut self, key: Key) -> Result<&Key> {
        let slot = self.key_mut(&key.id)?;
        if !key.history.starts_with(&slot.history) {
            return Err(InventoryError::HistoryRewritten(key.id));
        }
        *slot = key;
        Ok(slot)
    }

    pub fn edit_key(&mut self, actor: &User, id: &str, edit: KeyEdit, today: NaiveDate) -> Result<&Key> {
        if edit.name.trim().is_empty() {
            return Err(InventoryError::Validation("name"));
        }
        if edit.description.trim().is_empty() {
            return Err(InventoryError::Validation("description"));
        }
        let key = self.key_mut(id)?;
        key.name = edit.name;
        key.description = edit.description;
        key.rfid = blank_to_none(edit.rfid);
        key.history.push(
            HistoryEntry::new(today, &actor.name, "Edited").with_details("Key details updated"),
        );
        Ok(key)
    }

    pub fn delete_key(&mut self, actor: &User, id: &str) -> Result<Key> {
        let position = self
            .keys
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| InventoryError::KeyNotFound(id.to_string()))?;
        info!("Key {} deleted by {}", id, actor.name);
        Ok(self.keys.remove(position))
    }

    /// Hands an available key to `responsible`.
    pub fn check_out_key(
        &mut self,
        actor: &User,
        id: &str,
        request: KeyCheckOut,
        today: NaiveDate,
    ) -> Result<&Key> {
        let responsible = request.responsible.trim();
        if responsible.is_empty() {
            return Err(InventoryError::Validation("responsible"));
        }
        let key = self.key_mut(id)?;
        if key.status != KeyStatus::Available {
            return Err(InventoryError::invalid_transition(id, "checked out", key.status));
        }

        key.status = KeyStatus::InUse;
        key.location.responsible = responsible.to_string();
        key.history.push(
            HistoryEntry::new(today, &actor.name, "Check-out")
                .with_details(format!("Taken by {}.", responsible)),
        );
        info!("Key {} checked out to {}", id, responsible);
        Ok(key)
    }

    pub fn check_in_key(&mut self, actor: &User, id: &str, today: NaiveDate) -> Result<&Key> {
        let key = self.key_mut(id)?;
        if key.status != KeyStatus::InUse {
            return Err(InventoryError::invalid_transition(id, "checked in", key.status));
        }

        let previous = mem::replace(&mut key.location.responsible, NO_RESPONSIBLE.to_string());
        key.status = KeyStatus::Available;
        key.history.push(
            HistoryEntry::new(today, &actor.name, "Check-in")
                .with_details(format!("Returned by {} to {}.", previous, key.location.storage_point)),
        );
        info!("Key {} checked in", id);
        Ok(key)
    }

    /// Lost is terminal; the key keeps its last responsible for follow-up.
    pub fn report_key_lost(&mut self, actor: &User, id: &str, today: NaiveDate) -> Result<&Key> {
        let key = self.key_mut(id)?;
        if key.status == KeyStatus::Lost {
            return Err(InventoryError::invalid_transition(id, "reported lost", key.status));
        }

        key.status = KeyStatus::Lost;
        key.history.push(
            HistoryEntry::new(today, &actor.name, "Reported lost")
                .with_details(format!("Last held by {}.", key.location.responsible)),
        );
        warn!("Key {} reported lost by {}", id, actor.name);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::{admin, ana, date, key};

    fn inventory() -> Inventory {
        Inventory::new(
            vec![],
            vec![
                key("CHV-001", KeyStatus::Available),
                key("CHV-002", KeyStatus::InUse),
                key("CHV-003", KeyStatus::Lost),
            ],
            vec![admin(), ana()],
        )
    }

    fn new_key(rfid: Option<&str>) -> NewKey {
        NewKey {
            name: "Sala de Servidores".into(),
            description: "Chave mestra do CPD".into(),
            rfid: rfid.map(String::from),
        }
    }

    #[test]
    fn admin_registers_next_key() {
        let mut inventory = inventory();
        let key = inventory
            .create_key(&admin(), new_key(Some("  ")), "Claviculário B-02", date(2024, 7, 1))
            .unwrap();

        assert_eq!(key.id, "CHV-004");
        assert_eq!(key.status, KeyStatus::Available);
        assert_eq!(key.rfid, None);
        assert_eq!(key.location.storage_point, "Claviculário B-02");
        assert_eq!(key.location.responsible, NO_RESPONSIBLE);
        assert_eq!(key.history[0].action, "Key created");
    }

    #[test]
    fn only_admins_register_keys() {
        let mut inventory = inventory();
        let err = inventory
            .create_key(&ana(), new_key(None), "Claviculário A-01", date(2024, 7, 1))
            .unwrap_err();
        assert!(matches!(err, InventoryError::Forbidden(_)));
        assert_eq!(inventory.keys.len(), 3);
    }

    #[test]
    fn registration_requires_name_and_description() {
        let mut inventory = inventory();
        let mut new = new_key(None);
        new.description = " ".into();
        let err = inventory
            .create_key(&admin(), new, "Claviculário A-01", date(2024, 7, 1))
            .unwrap_err();
        assert_eq!(err, InventoryError::Validation("description"));
    }

    #[test]
    fn check_out_and_back_in() {
        let mut inventory = inventory();
        let out = inventory
            .check_out_key(
                &ana(),
                "CHV-001",
                KeyCheckOut {
                    responsible: "Carlos".into(),
                },
                date(2024, 7, 2),
            )
            .unwrap();
        assert_eq!(out.status, KeyStatus::InUse);
        assert_eq!(out.location.responsible, "Carlos");
        assert_eq!(out.history[0].details.as_deref(), Some("Taken by Carlos."));

        let back = inventory.check_in_key(&ana(), "CHV-001", date(2024, 7, 3)).unwrap();
        assert_eq!(back.status, KeyStatus::Available);
        assert_eq!(back.location.responsible, NO_RESPONSIBLE);
        assert_eq!(back.history.len(), 2);
        assert_eq!(back.history[1].action, "Check-in");
    }

    #[test]
    fn check_out_of_a_key_in_use_is_rejected() {
        let mut inventory = inventory();
        let err = inventory
            .check_out_key(
                &admin(),
                "CHV-002",
                KeyCheckOut {
                    responsible: "Carlos".into(),
                },
                date(2024, 7, 2),
            )
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::invalid_transition("CHV-002", "checked out", KeyStatus::InUse)
        );
    }

    #[test]
    fn lost_keys_stay_lost() {
        let mut inventory = inventory();
        let lost = inventory.report_key_lost(&admin(), "CHV-002", date(2024, 7, 2)).unwrap();
        assert_eq!(lost.status, KeyStatus::Lost);

        assert!(inventory.check_in_key(&admin(), "CHV-002", date(2024, 7, 3)).is_err());
        assert!(inventory.report_key_lost(&admin(), "CHV-003", date(2024, 7, 3)).is_err());
        assert_eq!(
            inventory.check_in_key(&admin(), "CHV-003", date(2024, 7, 3)),
            Err(InventoryError::invalid_transition("CHV-003", "checked in", KeyStatus::Lost))
        );
    }

    #[test]
    fn edit_normalizes_rfid_and_records_history() {
        let mut inventory = inventory();
        let edit = KeyEdit {
            name: "Almoxarifado".into(),
            description: "Porta principal".into(),
            rfid: Some(" RFID-KEY-009 ".into()),
        };
        let key = inventory.edit_key(&admin(), "CHV-001", edit, date(2024, 7, 4)).unwrap();
        assert_eq!(key.rfid.as_deref(), Some("RFID-KEY-009"));
        assert_eq!(key.history.last().unwrap().action, "Edited");
        assert_eq!(inventory.find_key_by_rfid("RFID-KEY-009").map(|k| k.id.as_str()), Ok("CHV-001"));
    }

    #[test]
    fn delete_and_replace_unknown_keys() {
        let mut inventory = inventory();
        assert_eq!(inventory.delete_key(&admin(), "CHV-003").map(|k| k.id), Ok("CHV-003".to_string()));
        assert_eq!(
            inventory.replace_key(key("CHV-003", KeyStatus::Available)).map(|k| k.id.clone()),
            Err(InventoryError::KeyNotFound("CHV-003".into()))
        );
    }

    #[test]
    fn replace_key_cannot_rewrite_history() {
        let mut inventory = inventory();
        let mut stored = inventory.key("CHV-001").unwrap().clone();
        stored.history.push(HistoryEntry::new(date(2024, 7, 1), "Admin", "Tag replaced"));
        assert_eq!(inventory.replace_key(stored.clone()).map(|k| k.history.len()), Ok(stored.history.len()));

        stored.history.remove(0);
        assert_eq!(
            inventory.replace_key(stored).map(|k| k.id.clone()),
            Err(InventoryError::HistoryRewritten("CHV-001".into()))
        );
    }
}
