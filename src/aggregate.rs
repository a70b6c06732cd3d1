//! Stateless reducers over a mission table or filtered view.
//!
//! Every function borrows its input through [`Rows`] and never mutates it.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use time::Date;

use crate::dataset::{Mission, Rows};
use crate::value::{MissionStatus, RocketStatus};

/// Field a table can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Company,
    Rocket,
    Mission,
    MissionStatus,
    RocketStatus,
}

impl GroupKey {
    /// The grouping text for `mission`, or `None` when the field is empty.
    #[must_use]
    pub fn extract(self, mission: &Mission) -> Option<&str> {
        let text = match self {
            Self::Company => mission.company.as_str(),
            Self::Rocket => mission.rocket.as_str(),
            Self::Mission => mission.mission.as_str(),
            Self::MissionStatus => mission.mission_status.as_ref()?.as_str(),
            Self::RocketStatus => mission.rocket_status.as_ref()?.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Rounds to two decimal places; exact halves go to the even neighbour.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Percentage `numerator / denominator * 100`, two decimals; zero when the
/// denominator is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round2(numerator as f64 / denominator as f64 * 100.0)
}

/// Counts rows per distinct key, in the order keys are first encountered.
pub fn count_by_group<T: Rows + ?Sized>(table: &T, key: GroupKey) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, usize)> = Vec::new();
    for mission in table.rows() {
        let Some(value) = key.extract(mission) else {
            continue;
        };
        if let Some(&position) = positions.get(value) {
            groups[position].1 += 1;
        } else {
            positions.insert(value, groups.len());
            groups.push((value.to_owned(), 1));
        }
    }
    groups
}

/// Orders groups by count descending, then key ascending, keeping at most `limit`.
#[must_use]
pub fn rank_groups(mut groups: Vec<(String, usize)>, limit: usize) -> Vec<(String, usize)> {
    groups.sort_by(|(key_a, count_a), (key_b, count_b)| {
        count_b.cmp(count_a).then_with(|| key_a.cmp(key_b))
    });
    groups.truncate(limit);
    groups
}

#[must_use]
pub fn top_groups<T: Rows + ?Sized>(
    table: &T,
    key: GroupKey,
    limit: usize,
) -> Vec<(String, usize)> {
    rank_groups(count_by_group(table, key), limit)
}

#[must_use]
pub fn distinct_count<T: Rows + ?Sized>(table: &T, key: GroupKey) -> usize {
    table
        .rows()
        .filter_map(|mission| key.extract(mission))
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct rockets among rows whose rocket is still active.
#[must_use]
pub fn active_rocket_count<T: Rows + ?Sized>(table: &T) -> usize {
    table
        .rows()
        .filter(|mission| matches!(mission.rocket_status, Some(RocketStatus::Active)))
        .filter_map(|mission| GroupKey::Rocket.extract(mission))
        .collect::<HashSet<_>>()
        .len()
}

#[must_use]
pub fn success_count<T: Rows + ?Sized>(table: &T) -> usize {
    table.rows().filter(|mission| mission.is_success()).count()
}

/// Share of successful rows as a percentage with two decimals.
#[must_use]
pub fn success_rate<T: Rows + ?Sized>(table: &T) -> f64 {
    rate(success_count(table), table.row_count())
}

/// Groups rows by launch year and reduces each group with `value_fn`.
///
/// Rows without a date are left out. Output is ascending by year.
pub fn time_series_by_year<'t, T, V, F>(table: &'t T, mut value_fn: F) -> Vec<(i32, V)>
where
    T: Rows + ?Sized,
    F: FnMut(&[&'t Mission]) -> V,
{
    let mut years: BTreeMap<i32, Vec<&Mission>> = BTreeMap::new();
    for mission in table.rows() {
        if let Some(year) = mission.year() {
            years.entry(year).or_default().push(mission);
        }
    }
    years
        .into_iter()
        .map(|(year, missions)| (year, value_fn(&missions)))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub missions: usize,
}

#[must_use]
pub fn yearly_counts<T: Rows + ?Sized>(table: &T) -> Vec<YearCount> {
    time_series_by_year(table, |missions| missions.len())
        .into_iter()
        .map(|(year, missions)| YearCount { year, missions })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlySuccess {
    pub year: i32,
    pub success_rate: f64,
    pub total_missions: usize,
}

#[must_use]
pub fn yearly_success<T: Rows + ?Sized>(table: &T) -> Vec<YearlySuccess> {
    time_series_by_year(table, |missions| {
        let successes = missions.iter().filter(|mission| mission.is_success()).count();
        (rate(successes, missions.len()), missions.len())
    })
    .into_iter()
    .map(|(year, (success_rate, total_missions))| YearlySuccess {
        year,
        success_rate,
        total_missions,
    })
    .collect()
}

/// Row counts for the four known mission outcomes.
///
/// Rows with a missing or unrecognised status are not counted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "Success")]
    pub success: usize,
    #[serde(rename = "Failure")]
    pub failure: usize,
    #[serde(rename = "Partial Failure")]
    pub partial_failure: usize,
    #[serde(rename = "Prelaunch Failure")]
    pub prelaunch_failure: usize,
}

impl StatusCounts {
    #[must_use]
    pub const fn get(&self, status: &MissionStatus) -> Option<usize> {
        match status {
            MissionStatus::Success => Some(self.success),
            MissionStatus::Failure => Some(self.failure),
            MissionStatus::PartialFailure => Some(self.partial_failure),
            MissionStatus::PrelaunchFailure => Some(self.prelaunch_failure),
            MissionStatus::Other(_) => None,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.success + self.failure + self.partial_failure + self.prelaunch_failure
    }

    /// Buckets in display order, zeros included.
    #[must_use]
    pub fn entries(&self) -> [(MissionStatus, usize); 4] {
        [
            (MissionStatus::Success, self.success),
            (MissionStatus::Failure, self.failure),
            (MissionStatus::PartialFailure, self.partial_failure),
            (MissionStatus::PrelaunchFailure, self.prelaunch_failure),
        ]
    }

    fn record(&mut self, status: &MissionStatus) {
        match status {
            MissionStatus::Success => self.success += 1,
            MissionStatus::Failure => self.failure += 1,
            MissionStatus::PartialFailure => self.partial_failure += 1,
            MissionStatus::PrelaunchFailure => self.prelaunch_failure += 1,
            MissionStatus::Other(_) => {}
        }
    }
}

#[must_use]
pub fn status_histogram<T: Rows + ?Sized>(table: &T) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for status in table.rows().filter_map(|mission| mission.mission_status.as_ref()) {
        counts.record(status);
    }
    counts
}

/// Earliest and latest launch dates, ignoring rows without a date.
#[must_use]
pub fn date_span<T: Rows + ?Sized>(table: &T) -> Option<(Date, Date)> {
    table
        .rows()
        .filter_map(|mission| mission.date)
        .fold(None, |span, date| match span {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        })
}
