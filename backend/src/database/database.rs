use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::error;

use crate::error::{InventoryError, Result};
use crate::inventory::Inventory;

/// Shared handle to the inventory. Clones point at the same state.
#[derive(Clone, Default)]
pub struct Database {
    inventory: Arc<RwLock<Inventory>>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseStats {
    pub assets: usize,
    pub keys: usize,
    pub users: usize,
}

impl Database {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Arc::new(RwLock::new(inventory)),
        }
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, Inventory>> {
        self.inventory.read().map_err(|e| {
            error!("Inventory lock poisoned: {}", e);
            InventoryError::Unavailable
        })
    }

    /// Exclusive access for the whole of one mutation.
    pub fn write(&self) -> Result<RwLockWriteGuard<'_, Inventory>> {
        self.inventory.write().map_err(|e| {
            error!("Inventory lock poisoned: {}", e);
            InventoryError::Unavailable
        })
    }

    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let inventory = self.read()?;
        Ok(DatabaseStats {
            assets: inventory.assets.len(),
            keys: inventory.keys.len(),
            users: inventory.users.len(),
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("inventory", &"RwLock<Inventory>")
            .finish()
    }
}
