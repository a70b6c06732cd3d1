mod fields;
pub mod header;

use csv::StringRecord;

use crate::dataset::Mission;
use crate::error::Result;
use crate::logger::log_warn;
use crate::value::{MissionStatus, RocketStatus};

pub use fields::{parse_date, parse_date_bound, parse_price};
pub use header::ColumnLayout;

/// Running tally of field-level problems recovered during a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldIssues {
    pub invalid_dates: u64,
    pub invalid_prices: u64,
    pub missing_prices: u64,
}

/// Turns source records into [`Mission`] values.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder {
    layout: ColumnLayout,
}

impl RecordDecoder {
    /// Builds a decoder for the given header row.
    ///
    /// # Errors
    ///
    /// Returns an error when a required column is missing.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            layout: ColumnLayout::resolve(headers)?,
        })
    }

    #[must_use]
    pub const fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Decodes one record. `row` is the 1-based data row used in warnings.
    ///
    /// Unparseable dates and prices become `None`; the record is kept.
    pub fn decode(&self, record: &StringRecord, row: u64, issues: &mut FieldIssues) -> Mission {
        let field = |index: usize| record.get(index).unwrap_or("");
        let layout = &self.layout;

        let raw_date = field(layout.date);
        let date = parse_date(raw_date);
        if date.is_none() && !raw_date.trim().is_empty() {
            issues.invalid_dates += 1;
            log_warn(&format!(
                "row {row}: unparseable {} value '{raw_date}'",
                header::DATE
            ));
        }

        let raw_price = field(layout.price);
        let price = parse_price(raw_price);
        if price.is_none() {
            if raw_price.trim().is_empty() {
                issues.missing_prices += 1;
            } else {
                issues.invalid_prices += 1;
                log_warn(&format!(
                    "row {row}: unparseable {} value '{raw_price}'",
                    header::PRICE
                ));
            }
        }

        Mission {
            mission: field(layout.mission).to_owned(),
            company: field(layout.company).to_owned(),
            date,
            rocket: field(layout.rocket).to_owned(),
            rocket_status: RocketStatus::from_label(field(layout.rocket_status)),
            mission_status: MissionStatus::from_label(field(layout.mission_status)),
            price,
        }
    }
}
