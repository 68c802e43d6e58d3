use std::borrow::Borrow;

use crate::models::Asset;

/// Case-insensitive substring match on name, identifier and physical location.
/// An empty query keeps every asset.
pub fn search<'a, A: Borrow<Asset>>(assets: &'a [A], query: &str) -> Vec<&'a Asset> {
    let needle = query.to_lowercase();
    assets
        .iter()
        .map(Borrow::borrow)
        .filter(|asset| needle.is_empty() || matches(asset, &needle))
        .collect()
}

fn matches(asset: &Asset, needle: &str) -> bool {
    let location = &asset.location.physical_location;
    asset.name.to_lowercase().contains(needle)
        || asset.id.to_lowercase().contains(needle)
        || (!location.is_empty() && location.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::test_support::{furniture, it_asset};

    #[test]
    fn empty_query_is_identity() {
        let assets = vec![it_asset("IT-001", "Ana Silva"), furniture("FUR-001", "Ana Silva")];
        assert_eq!(search(&assets, "").len(), 2);
    }

    #[test]
    fn matches_partial_identifier_ignoring_case() {
        let assets = vec![
            it_asset("IT-001", "Ana Silva"),
            it_asset("IT-002", "Ana Silva"),
            furniture("FUR-001", "Ana Silva"),
        ];
        let found: Vec<&str> = search(&assets, "it-00").iter().map(|a| a.id.as_str()).collect();
        assert_eq!(found, vec!["IT-001", "IT-002"]);
    }

    #[test]
    fn matches_name_and_location() {
        let mut notebook = it_asset("IT-001", "Ana Silva");
        notebook.name = "Notebook Dell XPS 15".into();
        let mut cabinet = furniture("FUR-003", "Facilities");
        cabinet.location.physical_location = "Almoxarifado".into();
        let assets = vec![notebook, cabinet];

        assert_eq!(search(&assets, "DELL")[0].id, "IT-001");
        assert_eq!(search(&assets, "almox")[0].id, "FUR-003");
        assert!(search(&assets, "projector").is_empty());
    }
}
