//! Asset inventory: furniture, IT equipment, vehicles and physical keys,
//! served over a JSON HTTP API.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod inventory;
pub mod models;
