use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use time::Date;

use crate::dataset::{Dataset, Mission, Rows};
use crate::logger::log_warn;
use crate::value::RocketStatus;

/// Rocket-status choice offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RocketStatusFilter {
    #[default]
    All,
    Active,
    Retired,
}

impl RocketStatusFilter {
    pub const CHOICES: [Self; 3] = [Self::All, Self::Active, Self::Retired];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Retired => "Retired",
        }
    }

    fn matches(self, status: Option<&RocketStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Active => matches!(status, Some(RocketStatus::Active)),
            Self::Retired => matches!(status, Some(RocketStatus::Retired)),
        }
    }
}

impl fmt::Display for RocketStatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RocketStatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "retired" => Ok(Self::Retired),
            other => Err(format!("unknown rocket status '{other}'")),
        }
    }
}

/// Inclusive calendar-date window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// True when both bounds are set and the start falls after the end.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    /// Missions without a date never fall inside a range.
    #[must_use]
    pub fn contains(&self, date: Option<Date>) -> bool {
        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Conjunction of per-dimension predicates.
///
/// Within the company and status dimensions any selected value matches; an
/// empty selection disables that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    date_range: Option<DateRange>,
    companies: BTreeSet<String>,
    statuses: BTreeSet<String>,
    rocket_status: RocketStatusFilter,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_date_range(mut self, start: Date, end: Date) -> Self {
        self.date_range = Some(DateRange::new(Some(start), Some(end)));
        self
    }

    /// Sets both bounds at once; a range with neither bound clears date filtering.
    #[must_use]
    pub const fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = if range.start.is_none() && range.end.is_none() {
            None
        } else {
            Some(range)
        };
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: Date) -> Self {
        let end = self.date_range.and_then(|range| range.end);
        self.date_range = Some(DateRange::new(Some(start), end));
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: Date) -> Self {
        let start = self.date_range.and_then(|range| range.start);
        self.date_range = Some(DateRange::new(start, Some(end)));
        self
    }

    #[must_use]
    pub fn with_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.companies.extend(companies.into_iter().map(Into::into));
        self
    }

    /// Selects mission outcomes by label, so unexpected labels can be chosen too.
    #[must_use]
    pub fn with_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses.extend(statuses.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_rocket_status(mut self, rocket_status: RocketStatusFilter) -> Self {
        self.rocket_status = rocket_status;
        self
    }

    #[must_use]
    pub const fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    #[must_use]
    pub const fn companies(&self) -> &BTreeSet<String> {
        &self.companies
    }

    #[must_use]
    pub const fn statuses(&self) -> &BTreeSet<String> {
        &self.statuses
    }

    #[must_use]
    pub const fn rocket_status(&self) -> RocketStatusFilter {
        self.rocket_status
    }

    /// Drops an inverted date range so the view falls back to no date filtering.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let Some(range) = self.date_range
            && range.is_inverted()
        {
            log_warn("start date falls after end date; ignoring the date range");
            self.date_range = None;
        }
        self
    }

    #[must_use]
    pub fn matches(&self, mission: &Mission) -> bool {
        if let Some(range) = &self.date_range
            && !range.contains(mission.date)
        {
            return false;
        }
        if !self.companies.is_empty() && !self.companies.contains(&mission.company) {
            return false;
        }
        if !self.statuses.is_empty()
            && !mission
                .mission_status
                .as_ref()
                .is_some_and(|status| self.statuses.contains(status.as_str()))
        {
            return false;
        }
        self.rocket_status.matches(mission.rocket_status.as_ref())
    }

    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        apply_filters(dataset, self)
    }
}

/// Order-preserving subset of a dataset.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every row.
    #[must_use]
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    #[must_use]
    pub const fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Positions of the matching rows within the dataset, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Mission> + '_ {
        let missions = self.dataset.missions();
        self.indices.iter().map(move |&index| &missions[index])
    }
}

impl Rows for FilteredView<'_> {
    fn row_count(&self) -> usize {
        self.indices.len()
    }

    fn rows(&self) -> impl Iterator<Item = &Mission> {
        let missions = self.dataset.missions();
        self.indices.iter().map(move |&index| &missions[index])
    }
}

/// Narrows `dataset` to the rows matching every active predicate of `spec`.
///
/// An inverted date range is applied as given and matches nothing; callers
/// that want the fallback behaviour should pass [`FilterSpec::normalized`].
pub fn apply_filters<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> FilteredView<'a> {
    let indices = dataset
        .iter()
        .enumerate()
        .filter(|(_, mission)| spec.matches(mission))
        .map(|(index, _)| index)
        .collect();
    FilteredView { dataset, indices }
}
