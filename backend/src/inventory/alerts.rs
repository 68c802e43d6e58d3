//! Upcoming maintenance, license and contract expirations.

use std::borrow::Borrow;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use super::midnight_utc;
use crate::models::{Asset, AssetDetails, LicenseExpiry, DATE_FORMAT, NO_RESPONSIBLE};

pub const DEFAULT_ALERT_WINDOW_DAYS: u32 = 30;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Maintenance,
    License,
    Contract,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub responsible: String,
    pub asset_id: String,
    pub due_date: NaiveDate,
}

/// Dates strictly after `now` and no later than `now + window`.
#[derive(Debug, Clone, Copy)]
struct AlertWindow {
    now: DateTime<Utc>,
    until: DateTime<Utc>,
}

impl AlertWindow {
    fn new(now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            now,
            until: now + window,
        }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        let at = midnight_utc(date);
        at > self.now && at <= self.until
    }
}

/// Alerts due inside the window, grouped by source.
///
/// Maintenance alerts come first, then licenses, then contracts. Within a
/// group the order follows the collection; nothing is sorted by date.
pub fn upcoming_alerts<A: Borrow<Asset>>(
    assets: &[A],
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<Alert> {
    let window = AlertWindow::new(now, window);
    let assets: Vec<&Asset> = assets.iter().map(Borrow::borrow).collect();

    let mut alerts = maintenance_alerts(&assets, &window);
    alerts.extend(license_alerts(&assets, &window));
    alerts.extend(contract_alerts(&assets, &window));
    alerts
}

fn maintenance_alerts(assets: &[&Asset], window: &AlertWindow) -> Vec<Alert> {
    assets
        .iter()
        .flat_map(|&asset| {
            asset
                .details
                .scheduled_maintenance()
                .iter()
                .filter(|m| window.contains(m.date))
                .map(move |m| Alert {
                    kind: AlertKind::Maintenance,
                    message: format!(
                        "Maintenance '{}' scheduled for {}",
                        m.kind,
                        m.date.format(DATE_FORMAT)
                    ),
                    responsible: NO_RESPONSIBLE.to_string(),
                    asset_id: asset.id.clone(),
                    due_date: m.date,
                })
        })
        .collect()
}

fn license_alerts(assets: &[&Asset], window: &AlertWindow) -> Vec<Alert> {
    let mut alerts = Vec::new();
    for asset in assets {
        let AssetDetails::It { installed_software, .. } = &asset.details else {
            continue;
        };
        for license in installed_software {
            let LicenseExpiry::On(expiry) = license.expiry_date else {
                continue;
            };
            if window.contains(expiry) {
                alerts.push(Alert {
                    kind: AlertKind::License,
                    message: format!(
                        "License for software '{}' expires on {}",
                        license.name,
                        expiry.format(DATE_FORMAT)
                    ),
                    responsible: asset.location.responsible.clone(),
                    asset_id: asset.id.clone(),
                    due_date: expiry,
                });
            }
        }
    }
    alerts
}

fn contract_alerts(assets: &[&Asset], window: &AlertWindow) -> Vec<Alert> {
    assets
        .iter()
        .flat_map(|&asset| {
            asset
                .contracts
                .iter()
                .filter(|c| window.contains(c.end_date))
                .map(move |c| Alert {
                    kind: AlertKind::Contract,
                    message: format!(
                        "{} contract with '{}' for '{}' ends on {}",
                        c.kind,
                        c.supplier,
                        asset.name,
                        c.end_date.format(DATE_FORMAT)
                    ),
                    responsible: asset.location.responsible.clone(),
                    asset_id: asset.id.clone(),
                    due_date: c.end_date,
                })
        })
        .collect()
}
