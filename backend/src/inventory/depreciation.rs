//! Straight-line depreciation of acquisition value.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::midnight_utc;
use crate::models::{Asset, DepreciationMethod};

pub const DAYS_PER_YEAR: f64 = 365.25;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Depreciation {
    pub is_applicable: bool,
    pub annual_depreciation: f64,
    pub accumulated: f64,
    pub book_value: f64,
}

impl Depreciation {
    fn not_applicable(value: f64) -> Self {
        Self {
            is_applicable: false,
            annual_depreciation: 0.0,
            accumulated: 0.0,
            book_value: value,
        }
    }
}

/// Book value of `asset` at `now`.
///
/// Only assets with a positive useful life and the linear method depreciate;
/// everything else keeps its acquisition value. Accumulated depreciation is
/// capped at the acquisition value, so the book value never goes negative.
pub fn depreciation(asset: &Asset, now: DateTime<Utc>) -> Depreciation {
    let acquisition = &asset.acquisition;
    let cost = acquisition.value;

    let useful_life = match (acquisition.useful_life_years, acquisition.depreciation_method) {
        (Some(years), Some(DepreciationMethod::Linear)) if years > 0 => years,
        _ => return Depreciation::not_applicable(cost),
    };

    let annual_depreciation = cost / f64::from(useful_life);
    let accumulated = (annual_depreciation * elapsed_years(acquisition.purchase_date, now)).min(cost);

    Depreciation {
        is_applicable: true,
        annual_depreciation,
        accumulated,
        book_value: (cost - accumulated).max(0.0),
    }
}

/// Partial days count as whole days.
fn elapsed_years(purchase_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    let purchased_at = midnight_utc(purchase_date);
    if now < purchased_at {
        return 0.0;
    }
    let days = ((now - purchased_at).num_seconds() as f64 / SECONDS_PER_DAY).ceil();
    days / DAYS_PER_YEAR
}
