//! Which assets a user is allowed to see.

use std::borrow::Borrow;

use crate::models::{Asset, AssetCategory, Role, User};

pub fn can_see(user: &User, asset: &Asset) -> bool {
    match user.role {
        Role::Admin => true,
        Role::FleetManager => asset.category() == AssetCategory::Vehicle,
        Role::Collaborator => asset.location.responsible == user.name,
        Role::Unknown => false,
    }
}

/// The subset of `assets` visible to `user`, in collection order.
pub fn visible_to<'a, A: Borrow<Asset>>(assets: &'a [A], user: &User) -> Vec<&'a Asset> {
    assets
        .iter()
        .map(Borrow::borrow)
        .filter(|asset| can_see(user, asset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::{furniture, it_asset, vehicle};

    fn ids(assets: &[&Asset]) -> Vec<String> {
        assets.iter().map(|a| a.id.clone()).collect()
    }

    fn sample() -> Vec<Asset> {
        vec![
            it_asset("IT-001", "Ana Silva"),
            it_asset("IT-002", "Equipe de TI"),
            furniture("FUR-001", "Ana Silva"),
            vehicle("VEH-001", "Roberto Lima"),
            vehicle("VEH-002", "Ana Silva"),
        ]
    }

    #[test]
    fn admin_sees_everything() {
        let assets = sample();
        let admin = User::new("user-admin", "Admin", Role::Admin);
        assert_eq!(visible_to(&assets, &admin).len(), assets.len());
    }

    #[test]
    fn fleet_manager_sees_only_vehicles() {
        let assets = sample();
        let manager = User::new("user-roberto", "Roberto Lima", Role::FleetManager);
        assert_eq!(ids(&visible_to(&assets, &manager)), vec!["VEH-001", "VEH-002"]);
    }

    #[test]
    fn collaborator_sees_what_they_are_responsible_for_in_any_category() {
        let assets = sample();
        let ana = User::new("user-ana", "Ana Silva", Role::Collaborator);
        assert_eq!(
            ids(&visible_to(&assets, &ana)),
            vec!["IT-001", "FUR-001", "VEH-002"]
        );
    }

    #[test]
    fn unknown_role_sees_nothing() {
        let assets = sample();
        let guest = User::new("user-guest", "Ana Silva", Role::Unknown);
        assert!(visible_to(&assets, &guest).is_empty());
    }
}
