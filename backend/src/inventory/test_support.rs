use chrono::NaiveDate;

use crate::models::{
    Acquisition, Asset, AssetCategory, AssetDetails, AssetStatus, Contract, ContractKind, ItSpecs, Key,
    KeyLocation, KeyStatus, LicenseExpiry, Location, Maintenance, Role, SoftwareLicense, User,
    VehicleData, VehicleDocumentation, NO_RESPONSIBLE,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn admin() -> User {
    User::new("user-admin", "Admin", Role::Admin)
}

pub fn ana() -> User {
    User::new("user-ana", "Ana Silva", Role::Collaborator)
}

pub fn roberto() -> User {
    User::new("user-roberto", "Roberto Lima", Role::FleetManager)
}

fn asset(id: &str, responsible: &str, category: AssetCategory) -> Asset {
    Asset {
        id: id.to_string(),
        name: format!("{} {}", category, id),
        description: String::new(),
        serial_number: format!("SN-{}", id),
        status: AssetStatus::Active,
        location: Location {
            physical_location: "Sala 301".to_string(),
            responsible: responsible.to_string(),
        },
        acquisition: Acquisition {
            purchase_date: date(2023, 5, 20),
            value: 1_000.0,
            invoice: "NF-0001".to_string(),
            supplier: "Supplier".to_string(),
            useful_life_years: None,
            depreciation_method: None,
        },
        identifiers: None,
        history: Vec::new(),
        allocation_history: Vec::new(),
        contracts: Vec::new(),
        photo_url: None,
        documents: Vec::new(),
        last_audited_date: None,
        details: empty_details(category),
    }
}

fn empty_details(category: AssetCategory) -> AssetDetails {
    match category {
        AssetCategory::Furniture => AssetDetails::Furniture {
            maintenance_schedule: Vec::new(),
        },
        AssetCategory::It => AssetDetails::It {
            specs: ItSpecs::default(),
            installed_software: Vec::new(),
            repair_history: Vec::new(),
        },
        AssetCategory::Vehicle => AssetDetails::Vehicle {
            vehicle_data: VehicleData::default(),
            documentation: VehicleDocumentation::default(),
            preventive_maintenance: Vec::new(),
            fuel_logs: Vec::new(),
        },
    }
}

pub fn it_asset(id: &str, responsible: &str) -> Asset {
    asset(id, responsible, AssetCategory::It)
}

pub fn furniture(id: &str, responsible: &str) -> Asset {
    asset(id, responsible, AssetCategory::Furniture)
}

pub fn vehicle(id: &str, responsible: &str) -> Asset {
    asset(id, responsible, AssetCategory::Vehicle)
}

pub fn license(name: &str, expiry_date: LicenseExpiry) -> SoftwareLicense {
    SoftwareLicense {
        id: format!("SW-{}", name),
        name: name.to_string(),
        license_key: "XXXXX-XXXXX".to_string(),
        expiry_date,
    }
}

pub fn maintenance(id: &str, on: NaiveDate) -> Maintenance {
    Maintenance {
        id: id.to_string(),
        date: on,
        kind: "Revision".to_string(),
        description: String::new(),
        cost: 100.0,
    }
}

pub fn contract(id: &str, end_date: NaiveDate) -> Contract {
    Contract {
        id: id.to_string(),
        kind: ContractKind::Warranty,
        supplier: "Dell Brasil".to_string(),
        start_date: date(2023, 1, 1),
        end_date,
        details: None,
    }
}

pub fn key(id: &str, status: KeyStatus) -> Key {
    Key {
        id: id.to_string(),
        name: format!("Key {}", id),
        description: String::new(),
        rfid: None,
        status,
        location: KeyLocation {
            storage_point: "Claviculário A-01".to_string(),
            responsible: NO_RESPONSIBLE.to_string(),
        },
        history: Vec::new(),
    }
}
