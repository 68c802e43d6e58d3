//! Dashboard figures, filtered reports and their CSV export.

use std::borrow::Borrow;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{depreciation, upcoming_alerts};
use crate::models::{Asset, AssetCategory, AssetStatus, Key, KeyStatus, DATE_FORMAT};

pub const CSV_SEPARATOR: &str = ";";

const CSV_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Category",
    "Status",
    "Location",
    "Responsible",
    "Acquisition Date",
    "Value",
];

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: AssetCategory,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: AssetStatus,
    pub count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryDepreciation {
    pub category: AssetCategory,
    pub accumulated: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_assets: usize,
    pub total_value: f64,
    pub total_depreciation: f64,
    pub active_alerts: usize,
    pub by_category: Vec<CategoryCount>,
    pub by_status: Vec<StatusCount>,
    pub depreciation_by_category: Vec<CategoryDepreciation>,
}

/// Headline figures over the assets a user can see. Categories and statuses
/// with no assets are left out of the breakdowns.
pub fn dashboard<A: Borrow<Asset>>(assets: &[A], now: DateTime<Utc>, alert_window: Duration) -> DashboardSummary {
    let assets: Vec<&Asset> = assets.iter().map(Borrow::borrow).collect();

    let by_category = AssetCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: assets.iter().filter(|a| a.category() == category).count(),
        })
        .filter(|c| c.count > 0)
        .collect();

    let by_status = AssetStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: assets.iter().filter(|a| a.status == status).count(),
        })
        .filter(|s| s.count > 0)
        .collect();

    let depreciation_by_category = AssetCategory::ALL
        .into_iter()
        .map(|category| CategoryDepreciation {
            category,
            accumulated: assets
                .iter()
                .filter(|a| a.category() == category)
                .map(|a| depreciation(a, now).accumulated)
                .filter(|accumulated| *accumulated > 0.0)
                .sum(),
        })
        .filter(|d| d.accumulated > 0.0)
        .collect();

    DashboardSummary {
        total_assets: assets.len(),
        total_value: assets.iter().map(|a| a.acquisition.value).sum(),
        total_depreciation: assets.iter().map(|a| depreciation(a, now).accumulated).sum(),
        active_alerts: upcoming_alerts(&assets, now, alert_window).len(),
        by_category,
        by_status,
        depreciation_by_category,
    }
}

/// Report criteria; every unset field matches everything.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<AssetCategory>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
}

impl ReportFilter {
    /// Date bounds are inclusive and apply to the purchase date; the location
    /// is a case-insensitive substring of the physical location.
    pub fn matches(&self, asset: &Asset) -> bool {
        let purchased = asset.acquisition.purchase_date;
        if self.start_date.is_some_and(|start| purchased < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| purchased > end) {
            return false;
        }
        if self.category.is_some_and(|category| asset.category() != category) {
            return false;
        }
        if self.status.is_some_and(|status| asset.status != status) {
            return false;
        }
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => asset
                .location
                .physical_location
                .to_lowercase()
                .contains(&location.to_lowercase()),
            _ => true,
        }
    }
}

pub fn filter_report<'a, A: Borrow<Asset>>(assets: &'a [A], filter: &ReportFilter) -> Vec<&'a Asset> {
    assets
        .iter()
        .map(Borrow::borrow)
        .filter(|asset| filter.matches(asset))
        .collect()
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(CSV_SEPARATOR)
}

pub fn export_csv<A: Borrow<Asset>>(assets: &[A]) -> String {
    let mut lines = vec![csv_row(CSV_HEADER)];
    lines.extend(assets.iter().map(Borrow::borrow).map(|asset: &Asset| {
        csv_row([
            asset.id.clone(),
            asset.name.clone(),
            asset.category().to_string(),
            asset.status.to_string(),
            asset.location.physical_location.clone(),
            asset.location.responsible.clone(),
            asset.acquisition.purchase_date.format(DATE_FORMAT).to_string(),
            format!("{:.2}", asset.acquisition.value),
        ])
    }));
    lines.join("\n")
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyStats {
    pub total: usize,
    pub available: usize,
    pub in_use: usize,
    pub lost: usize,
}

pub fn key_stats(keys: &[Key]) -> KeyStats {
    keys.iter().fold(KeyStats::default(), |mut stats, key| {
        stats.total += 1;
        match key.status {
            KeyStatus::Available => stats.available += 1,
            KeyStatus::InUse => stats.in_use += 1,
            KeyStatus::Lost => stats.lost += 1,
        }
        stats
    })
}

/// Distinct non-empty physical locations, in order of first appearance.
pub fn locations<A: Borrow<Asset>>(assets: &[A]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for asset in assets {
        let asset: &Asset = asset.borrow();
        let location = asset.location.physical_location.trim();
        if !location.is_empty() && !seen.iter().any(|l| l == location) {
            seen.push(location.to_string());
        }
    }
    seen
}
