use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One custody period of an asset. `end_date` stays empty while the holder has it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Allocation {
    pub user: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Allocation {
    pub fn open(user: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            user: user.into(),
            start_date,
            end_date: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }
}

#[derive(Deserialize, Debug)]
pub struct CheckOutRequest {
    #[serde(default)]
    pub responsible: String,
    pub location: String,
}

#[derive(Deserialize, Debug)]
pub struct CheckInRequest {
    pub storage_location: String,
}
