//! Payloads handed to whatever renders the dashboard.
//!
//! Nothing here draws anything; these types collect the numbers a summary
//! card, chart, or table needs from a filtered view.

use serde::{Serialize, Serializer};
use time::Date;

use crate::aggregate::{
    GroupKey, StatusCounts, YearCount, YearlySuccess, active_rocket_count, date_span,
    distinct_count, status_histogram, success_count, success_rate, top_groups, yearly_counts,
    yearly_success,
};
use crate::dataset::{Dataset, Mission};
use crate::filter::{DateRange, FilterSpec, FilteredView, RocketStatusFilter};

/// Companies listed in the ranking chart.
pub const TOP_COMPANIES: usize = 10;

#[allow(clippy::ref_option)]
fn serialize_date<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.serialize_str(&date.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Choices offered by the filter widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    #[serde(serialize_with = "serialize_date")]
    pub first_date: Option<Date>,
    #[serde(serialize_with = "serialize_date")]
    pub last_date: Option<Date>,
    /// Distinct companies, sorted.
    pub companies: Vec<String>,
    /// Distinct non-empty status labels, sorted.
    pub statuses: Vec<String>,
    #[serde(serialize_with = "serialize_rocket_choices")]
    pub rocket_statuses: [RocketStatusFilter; 3],
}

fn serialize_rocket_choices<S: Serializer>(
    choices: &[RocketStatusFilter; 3],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(choices.iter().map(|choice| choice.as_str()))
}

fn sorted_distinct(dataset: &Dataset, key: GroupKey) -> Vec<String> {
    let mut values: Vec<String> = dataset
        .iter()
        .filter_map(|mission| key.extract(mission))
        .map(str::to_owned)
        .collect();
    values.sort_unstable();
    values.dedup();
    values
}

impl FilterOptions {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let span = date_span(dataset);
        Self {
            first_date: span.map(|(first, _)| first),
            last_date: span.map(|(_, last)| last),
            companies: sorted_distinct(dataset, GroupKey::Company),
            statuses: sorted_distinct(dataset, GroupKey::MissionStatus),
            rocket_statuses: RocketStatusFilter::CHOICES,
        }
    }

    /// Completes a user-supplied range with the dataset's span.
    ///
    /// With no bounds at all the full span is used, which leaves out missions
    /// that have no launch date. A single bound leaves the other side open.
    #[must_use]
    pub const fn resolve_range(&self, start: Option<Date>, end: Option<Date>) -> DateRange {
        if start.is_none() && end.is_none() {
            return DateRange::new(self.first_date, self.last_date);
        }
        DateRange::new(start, end)
    }

    /// A filter holding only the resolved date range.
    #[must_use]
    pub fn date_spec(&self, start: Option<Date>, end: Option<Date>) -> FilterSpec {
        FilterSpec::new().with_range(self.resolve_range(start, end))
    }

    /// The filter the dashboard starts from: the full date span, nothing else.
    #[must_use]
    pub fn default_spec(&self) -> FilterSpec {
        self.date_spec(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub missions: usize,
}

/// Everything the summary cards and charts show for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_missions: usize,
    pub dataset_missions: usize,
    pub successful_missions: usize,
    pub success_rate: f64,
    pub companies: usize,
    pub active_rockets: usize,
    pub missions_per_year: Vec<YearCount>,
    pub status_distribution: StatusCounts,
    pub top_companies: Vec<CompanyCount>,
    pub success_by_year: Vec<YearlySuccess>,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(view: &FilteredView<'_>) -> Self {
        Self {
            total_missions: view.len(),
            dataset_missions: view.dataset().len(),
            successful_missions: success_count(view),
            success_rate: success_rate(view),
            companies: distinct_count(view, GroupKey::Company),
            active_rockets: active_rocket_count(view),
            missions_per_year: yearly_counts(view),
            status_distribution: status_histogram(view),
            top_companies: top_groups(view, GroupKey::Company, TOP_COMPANIES)
                .into_iter()
                .map(|(company, missions)| CompanyCount { company, missions })
                .collect(),
            success_by_year: yearly_success(view),
        }
    }

    /// Caption shown above the row table.
    #[must_use]
    pub fn showing_caption(&self) -> String {
        format!(
            "Showing {} of {} missions.",
            group_thousands(self.total_missions),
            group_thousands(self.dataset_missions)
        )
    }
}

/// Formats a count with `,` thousands separators.
#[must_use]
pub fn group_thousands(value: usize) -> String {
    let mut buffer = itoa::Buffer::new();
    let digits = buffer.format(value);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// One row of the data explorer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    #[serde(rename = "Mission")]
    pub mission: String,
    #[serde(rename = "Company")]
    pub company: String,
    /// `YYYY-MM-DD`, empty when the date is unknown.
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Rocket")]
    pub rocket: String,
    #[serde(rename = "RocketStatus")]
    pub rocket_status: String,
    #[serde(rename = "MissionStatus")]
    pub mission_status: String,
    /// `$<millions>` with one decimal, empty when the price is unknown.
    #[serde(rename = "Price (Millions $)")]
    pub price: String,
}

impl DisplayRow {
    #[must_use]
    pub fn from_mission(mission: &Mission) -> Self {
        Self {
            mission: mission.mission.clone(),
            company: mission.company.clone(),
            date: mission.date.map(|date| date.to_string()).unwrap_or_default(),
            rocket: mission.rocket.clone(),
            rocket_status: mission
                .rocket_status
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            mission_status: mission
                .mission_status
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            price: mission
                .price
                .map(|price| format!("${price:.1}"))
                .unwrap_or_default(),
        }
    }
}

#[must_use]
pub fn display_rows(view: &FilteredView<'_>) -> Vec<DisplayRow> {
    view.iter().map(DisplayRow::from_mission).collect()
}
