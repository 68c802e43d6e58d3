pub mod allocation;
pub mod key;
pub mod user;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use allocation::{Allocation, CheckInRequest, CheckOutRequest};
pub use key::{Key, KeyCheckOut, KeyEdit, KeyLocation, KeyStatus, NewKey};
pub use user::{Role, User};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire value of a license that never expires.
pub const PERPETUAL_LICENSE: &str = "Perpétua";

/// Placeholder responsible party for items nobody holds.
pub const NO_RESPONSIBLE: &str = "N/A";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    #[serde(rename = "IT")]
    It,
    Furniture,
    Vehicle,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [AssetCategory::It, AssetCategory::Furniture, AssetCategory::Vehicle];

    /// Identifier prefix used when numbering new assets.
    pub fn prefix(self) -> &'static str {
        match self {
            AssetCategory::It => "IT",
            AssetCategory::Furniture => "FUR",
            AssetCategory::Vehicle => "VEH",
        }
    }

    /// Name of the list view a client shows for this category.
    pub fn list_view(self) -> &'static str {
        match self {
            AssetCategory::It => "IT",
            AssetCategory::Furniture => "FURNITURE",
            AssetCategory::Vehicle => "VEHICLES",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetCategory::It => "IT",
            AssetCategory::Furniture => "Furniture",
            AssetCategory::Vehicle => "Vehicle",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    InMaintenance,
    Decommissioned,
    InStock,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Active,
        AssetStatus::InMaintenance,
        AssetStatus::Decommissioned,
        AssetStatus::InStock,
    ];
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetStatus::Active => "Active",
            AssetStatus::InMaintenance => "In Maintenance",
            AssetStatus::Decommissioned => "Decommissioned",
            AssetStatus::InStock => "In Stock",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub physical_location: String,
    pub responsible: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    Linear,
    #[serde(other)]
    Unsupported,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Acquisition {
    pub purchase_date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub invoice: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub useful_life_years: Option<u32>,
    #[serde(default)]
    pub depreciation_method: Option<DepreciationMethod>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Identifiers {
    pub rfid: Option<String>,
    pub barcode: Option<String>,
    pub qr_code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub user: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, user: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            date,
            user: user.into(),
            action: action.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Warranty,
    Maintenance,
    Insurance,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContractKind::Warranty => "Warranty",
            ContractKind::Maintenance => "Maintenance",
            ContractKind::Insurance => "Insurance",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Contract {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContractKind,
    pub supplier: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct NewContract {
    #[serde(rename = "type")]
    pub kind: ContractKind,
    pub supplier: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Maintenance {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Deserialize, Debug)]
pub struct NewMaintenance {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LicenseExpiry {
    Perpetual,
    On(NaiveDate),
}

impl Serialize for LicenseExpiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LicenseExpiry::Perpetual => serializer.serialize_str(PERPETUAL_LICENSE),
            LicenseExpiry::On(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        }
    }
}

impl<'de> Deserialize<'de> for LicenseExpiry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        if raw == PERPETUAL_LICENSE || raw.eq_ignore_ascii_case("perpetual") {
            return Ok(LicenseExpiry::Perpetual);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(LicenseExpiry::On)
            .map_err(|e| D::Error::custom(format!("invalid license expiry '{}': {}", raw, e)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SoftwareLicense {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub license_key: String,
    pub expiry_date: LicenseExpiry,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FuelLog {
    pub id: String,
    pub date: NaiveDate,
    pub cost: f64,
    pub liters: f64,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub odometer: u32,
}

#[derive(Deserialize, Debug)]
pub struct NewFuelLog {
    pub date: NaiveDate,
    pub cost: f64,
    pub liters: f64,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub odometer: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ItSpecs {
    #[serde(default)]
    pub processor: String,
    #[serde(default)]
    pub ram: String,
    #[serde(default)]
    pub storage: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VehicleData {
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub renavam: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub market_value: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct VehicleDocumentation {
    pub ipva_due_date: Option<NaiveDate>,
    pub licensing_due_date: Option<NaiveDate>,
    pub insurance_expiry: Option<NaiveDate>,
}

/// Category-specific payload, discriminated by the `category` field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "category")]
pub enum AssetDetails {
    Furniture {
        #[serde(default)]
        maintenance_schedule: Vec<Maintenance>,
    },
    #[serde(rename = "IT")]
    It {
        #[serde(default)]
        specs: ItSpecs,
        #[serde(default)]
        installed_software: Vec<SoftwareLicense>,
        #[serde(default)]
        repair_history: Vec<Maintenance>,
    },
    Vehicle {
        #[serde(default)]
        vehicle_data: VehicleData,
        #[serde(default)]
        documentation: VehicleDocumentation,
        #[serde(default)]
        preventive_maintenance: Vec<Maintenance>,
        #[serde(default)]
        fuel_logs: Vec<FuelLog>,
    },
}

impl AssetDetails {
    pub fn category(&self) -> AssetCategory {
        match self {
            AssetDetails::Furniture { .. } => AssetCategory::Furniture,
            AssetDetails::It { .. } => AssetCategory::It,
            AssetDetails::Vehicle { .. } => AssetCategory::Vehicle,
        }
    }

    /// Scheduled maintenance that feeds upcoming-maintenance alerts.
    ///
    /// IT repair history is a record of past work and never raises alerts.
    pub fn scheduled_maintenance(&self) -> &[Maintenance] {
        match self {
            AssetDetails::Furniture { maintenance_schedule } => maintenance_schedule,
            AssetDetails::Vehicle {
                preventive_maintenance,
                ..
            } => preventive_maintenance,
            AssetDetails::It { .. } => &[],
        }
    }

    /// The list a newly recorded maintenance entry belongs to.
    pub fn maintenance_log_mut(&mut self) -> &mut Vec<Maintenance> {
        match self {
            AssetDetails::Furniture { maintenance_schedule } => maintenance_schedule,
            AssetDetails::It { repair_history, .. } => repair_history,
            AssetDetails::Vehicle {
                preventive_maintenance,
                ..
            } => preventive_maintenance,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serial_number: String,
    pub status: AssetStatus,
    pub location: Location,
    pub acquisition: Acquisition,
    #[serde(default)]
    pub identifiers: Option<Identifiers>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub allocation_history: Vec<Allocation>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub last_audited_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub details: AssetDetails,
}

impl Asset {
    pub fn category(&self) -> AssetCategory {
        self.details.category()
    }

    pub fn matches_barcode(&self, code: &str) -> bool {
        self.identifiers
            .as_ref()
            .and_then(|ids| ids.barcode.as_deref())
            == Some(code)
    }

    pub fn matches_qr_code(&self, code: &str) -> bool {
        self.identifiers
            .as_ref()
            .and_then(|ids| ids.qr_code.as_deref())
            == Some(code)
    }
}

#[derive(Deserialize, Debug)]
pub struct NewAsset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub serial_number: String,
    pub status: AssetStatus,
    pub location: Location,
    pub acquisition: Acquisition,
    #[serde(default)]
    pub identifiers: Option<Identifiers>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(flatten)]
    pub details: AssetDetails,
}

/// Partial edit of the fields tracked by the edit-save history entry.
#[derive(Deserialize, Debug, Default)]
pub struct AssetEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub physical_location: Option<String>,
    pub responsible: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct StatusChange {
    pub status: AssetStatus,
}
