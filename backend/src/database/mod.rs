pub mod database;
pub mod seed;

use tracing::{info, warn};

pub use database::{Database, DatabaseStats};

use crate::config::AppConfig;
use crate::inventory::Inventory;

/// Builds the shared inventory.
///
/// The demo users are always loaded since there is no way to register users
/// over the API; assets and keys are only loaded when seeding is enabled.
pub fn init(config: &AppConfig) -> Database {
    let demo = match seed::demo_inventory() {
        Ok(demo) => demo,
        Err(e) => {
            warn!("Demo data could not be loaded, starting empty: {}", e);
            return Database::new(Inventory::default());
        }
    };

    if !config.seed_demo_data {
        info!("Starting with an empty inventory and {} users", demo.users.len());
        return Database::new(Inventory::new(Vec::new(), Vec::new(), demo.users));
    }

    info!(
        "Loaded demo inventory: {} assets, {} keys, {} users",
        demo.assets.len(),
        demo.keys.len(),
        demo.users.len()
    );
    Database::new(demo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseeded_inventory_keeps_users_only() {
        let db = init(&AppConfig::default().with_seed_demo_data(false));
        let stats = db.get_stats().unwrap();
        assert_eq!((stats.assets, stats.keys, stats.users), (0, 0, 3));
    }

    #[test]
    fn seeded_inventory_has_demo_records() {
        let stats = init(&AppConfig::default()).get_stats().unwrap();
        assert_eq!((stats.assets, stats.keys, stats.users), (7, 3, 3));
    }
}
