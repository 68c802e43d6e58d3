use std::fmt;

use serde::{Deserialize, Serialize};

use super::HistoryEntry;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyStatus {
    Available,
    InUse,
    Lost,
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyStatus::Available => "Available",
            KeyStatus::InUse => "In Use",
            KeyStatus::Lost => "Lost",
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KeyLocation {
    pub storage_point: String,
    pub responsible: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Key {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rfid: Option<String>,
    pub status: KeyStatus,
    pub location: KeyLocation,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Deserialize, Debug)]
pub struct NewKey {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rfid: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct KeyEdit {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub rfid: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct KeyCheckOut {
    pub responsible: String,
}
