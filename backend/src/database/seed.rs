//! Demo users, assets and keys loaded when seeding is enabled.

use crate::inventory::Inventory;

const DEMO_DATA: &str = include_str!("seed.json");

pub fn demo_inventory() -> serde_json::Result<Inventory> {
    serde_json::from_str(DEMO_DATA)
}
