use std::borrow::Cow;

use csv::StringRecord;

use crate::error::{Error, Result};

pub const MISSION: &str = "Mission";
pub const COMPANY: &str = "Company";
pub const DATE: &str = "Date";
pub const ROCKET: &str = "Rocket";
pub const ROCKET_STATUS: &str = "RocketStatus";
pub const MISSION_STATUS: &str = "MissionStatus";
pub const PRICE: &str = "Price";

/// Positions of the mission fields within a source record.
///
/// Names are matched exactly and case-sensitively; columns the table does
/// not use are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub mission: usize,
    pub company: usize,
    pub date: usize,
    pub rocket: usize,
    pub rocket_status: usize,
    pub mission_status: usize,
    pub price: usize,
}

impl ColumnLayout {
    /// Resolves required column positions from a header row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingColumn`] for the first required column that is absent.
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or(Error::MissingColumn {
                    column: Cow::Borrowed(name),
                })
        };
        Ok(Self {
            mission: find(MISSION)?,
            company: find(COMPANY)?,
            date: find(DATE)?,
            rocket: find(ROCKET)?,
            rocket_status: find(ROCKET_STATUS)?,
            mission_status: find(MISSION_STATUS)?,
            price: find(PRICE)?,
        })
    }
}
