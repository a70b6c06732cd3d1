//! Fixed-shape analytics over the full mission dataset.
//!
//! None of these fail: malformed arguments produce the neutral answer for
//! the query (0, 0.0, an empty list, or `None`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use time::{PrimitiveDateTime, Time};

use crate::aggregate::{GroupKey, StatusCounts, rate, round2, status_histogram, top_groups};
use crate::dataset::{Dataset, Mission};
use crate::parser::parse_date_bound;

fn company_missions<'a>(
    dataset: &'a Dataset,
    company: &'a str,
) -> impl Iterator<Item = &'a Mission> + 'a {
    dataset
        .iter()
        .filter(move |mission| GroupKey::Company.extract(mission) == Some(company))
}

/// Number of missions launched by `company`.
#[must_use]
pub fn mission_count_by_company(dataset: &Dataset, company: &str) -> usize {
    company_missions(dataset, company).count()
}

/// Percentage of `company`'s missions that succeeded, two decimals.
#[must_use]
pub fn success_rate_by_company(dataset: &Dataset, company: &str) -> f64 {
    let (total, successes) = company_missions(dataset, company).fold(
        (0usize, 0usize),
        |(total, successes), mission| (total + 1, successes + usize::from(mission.is_success())),
    );
    rate(successes, total)
}

/// Names of missions launched within `[start, end]`, earliest first.
///
/// Bounds are `YYYY-MM-DD`, optionally with a time of day. Launches on the
/// same date keep their dataset order.
#[must_use]
pub fn missions_in_date_range<'a>(dataset: &'a Dataset, start: &str, end: &str) -> Vec<&'a str> {
    let (Some(start), Some(end)) = (parse_date_bound(start), parse_date_bound(end)) else {
        return Vec::new();
    };
    if start > end {
        return Vec::new();
    }
    let mut hits: Vec<(PrimitiveDateTime, &str)> = dataset
        .iter()
        .filter_map(|mission| {
            let launched = PrimitiveDateTime::new(mission.date?, Time::MIDNIGHT);
            (start <= launched && launched <= end).then_some((launched, mission.mission.as_str()))
        })
        .collect();
    hits.sort_by_key(|(launched, _)| *launched);
    hits.into_iter().map(|(_, name)| name).collect()
}

/// Up to `n` companies with the most missions; ties go to the
/// alphabetically earlier name.
#[must_use]
pub fn top_companies_by_count(dataset: &Dataset, n: i64) -> Vec<(String, usize)> {
    if n <= 0 {
        return Vec::new();
    }
    let limit = usize::try_from(n).unwrap_or(usize::MAX);
    top_groups(dataset, GroupKey::Company, limit)
}

#[must_use]
pub fn mission_status_counts(dataset: &Dataset) -> StatusCounts {
    status_histogram(dataset)
}

#[must_use]
pub fn missions_in_year(dataset: &Dataset, year: i32) -> usize {
    dataset
        .iter()
        .filter(|mission| mission.year() == Some(year))
        .count()
}

/// Rocket with the most missions; ties go to the alphabetically earlier name.
#[must_use]
pub fn most_used_rocket(dataset: &Dataset) -> Option<String> {
    top_groups(dataset, GroupKey::Rocket, 1)
        .into_iter()
        .next()
        .map(|(rocket, _)| rocket)
}

/// Mean missions per calendar year over `[start_year, end_year]`, two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_missions_per_year(dataset: &Dataset, start_year: i32, end_year: i32) -> f64 {
    let years = i64::from(end_year) - i64::from(start_year) + 1;
    if years <= 0 {
        return 0.0;
    }
    let total = dataset
        .iter()
        .filter_map(Mission::year)
        .filter(|year| (start_year..=end_year).contains(year))
        .count();
    round2(total as f64 / years as f64)
}

/// The analytic questions that can be asked by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    MissionCountByCompany,
    SuccessRateByCompany,
    MissionsInDateRange,
    TopCompaniesByCount,
    MissionStatusCounts,
    MissionsInYear,
    MostUsedRocket,
    AverageMissionsPerYear,
}

impl QueryKind {
    pub const ALL: [Self; 8] = [
        Self::MissionCountByCompany,
        Self::SuccessRateByCompany,
        Self::MissionsInDateRange,
        Self::TopCompaniesByCount,
        Self::MissionStatusCounts,
        Self::MissionsInYear,
        Self::MostUsedRocket,
        Self::AverageMissionsPerYear,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MissionCountByCompany => "mission-count-by-company",
            Self::SuccessRateByCompany => "success-rate-by-company",
            Self::MissionsInDateRange => "missions-in-date-range",
            Self::TopCompaniesByCount => "top-companies-by-count",
            Self::MissionStatusCounts => "mission-status-counts",
            Self::MissionsInYear => "missions-in-year",
            Self::MostUsedRocket => "most-used-rocket",
            Self::AverageMissionsPerYear => "average-missions-per-year",
        }
    }

    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::MissionCountByCompany | Self::SuccessRateByCompany => "<company>",
            Self::MissionsInDateRange => "<start-date> <end-date>",
            Self::TopCompaniesByCount => "<n>",
            Self::MissionStatusCounts | Self::MostUsedRocket => "",
            Self::MissionsInYear => "<year>",
            Self::AverageMissionsPerYear => "<start-year> <end-year>",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QueryKind {
    type Err = String;

    /// Accepts kebab-case, snake_case, or camelCase names, with or without a
    /// leading `get`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let folded = folded.strip_prefix("get").unwrap_or(&folded);
        let kind = match folded {
            "missioncountbycompany" => Self::MissionCountByCompany,
            "successratebycompany" | "successrate" => Self::SuccessRateByCompany,
            "missionsindaterange" | "missionsbydaterange" => Self::MissionsInDateRange,
            "topcompaniesbycount" | "topcompaniesbymissioncount" => Self::TopCompaniesByCount,
            "missionstatuscounts" | "missionstatuscount" => Self::MissionStatusCounts,
            "missionsinyear" | "missionsbyyear" => Self::MissionsInYear,
            "mostusedrocket" => Self::MostUsedRocket,
            "averagemissionsperyear" => Self::AverageMissionsPerYear,
            _ => return Err(format!("unknown query '{s}'")),
        };
        Ok(kind)
    }
}

/// A query with its arguments decoded from untyped text.
///
/// An argument that does not decode (wrong count, not an integer, a boolean
/// literal where an integer belongs) is kept as `None` and the query answers
/// with its neutral value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    MissionCountByCompany(Option<String>),
    SuccessRateByCompany(Option<String>),
    MissionsInDateRange(Option<(String, String)>),
    TopCompaniesByCount(Option<i64>),
    MissionStatusCounts,
    MissionsInYear(Option<i32>),
    MostUsedRocket,
    AverageMissionsPerYear(Option<(i32, i32)>),
}

fn int_arg(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false") {
        return None;
    }
    raw.parse().ok()
}

fn year_arg(raw: &str) -> Option<i32> {
    int_arg(raw).and_then(|year| i32::try_from(year).ok())
}

impl Query {
    #[must_use]
    pub fn parse(kind: QueryKind, args: &[String]) -> Self {
        match kind {
            QueryKind::MissionCountByCompany => Self::MissionCountByCompany(one(args).cloned()),
            QueryKind::SuccessRateByCompany => Self::SuccessRateByCompany(one(args).cloned()),
            QueryKind::MissionsInDateRange => Self::MissionsInDateRange(
                two(args).map(|(start, end)| (start.clone(), end.clone())),
            ),
            QueryKind::TopCompaniesByCount => {
                Self::TopCompaniesByCount(one(args).and_then(|n| int_arg(n)))
            }
            QueryKind::MissionStatusCounts => Self::MissionStatusCounts,
            QueryKind::MissionsInYear => Self::MissionsInYear(one(args).and_then(|y| year_arg(y))),
            QueryKind::MostUsedRocket => Self::MostUsedRocket,
            QueryKind::AverageMissionsPerYear => Self::AverageMissionsPerYear(
                two(args).and_then(|(start, end)| Some((year_arg(start)?, year_arg(end)?))),
            ),
        }
    }

    #[must_use]
    pub fn run(&self, dataset: &Dataset) -> QueryAnswer {
        match self {
            Self::MissionCountByCompany(company) => QueryAnswer::Count(
                company
                    .as_deref()
                    .map_or(0, |company| mission_count_by_company(dataset, company)),
            ),
            Self::SuccessRateByCompany(company) => QueryAnswer::Rate(
                company
                    .as_deref()
                    .map_or(0.0, |company| success_rate_by_company(dataset, company)),
            ),
            Self::MissionsInDateRange(range) => {
                QueryAnswer::Missions(range.as_ref().map_or_else(Vec::new, |(start, end)| {
                    missions_in_date_range(dataset, start, end)
                        .into_iter()
                        .map(str::to_owned)
                        .collect()
                }))
            }
            Self::TopCompaniesByCount(n) => QueryAnswer::Ranking(
                n.map_or_else(Vec::new, |n| top_companies_by_count(dataset, n)),
            ),
            Self::MissionStatusCounts => QueryAnswer::Statuses(mission_status_counts(dataset)),
            Self::MissionsInYear(year) => {
                QueryAnswer::Count(year.map_or(0, |year| missions_in_year(dataset, year)))
            }
            Self::MostUsedRocket => QueryAnswer::Rocket(most_used_rocket(dataset)),
            Self::AverageMissionsPerYear(years) => {
                QueryAnswer::Rate(years.map_or(0.0, |(start, end)| {
                    average_missions_per_year(dataset, start, end)
                }))
            }
        }
    }
}

fn one(args: &[String]) -> Option<&String> {
    match args {
        [only] => Some(only),
        _ => None,
    }
}

fn two(args: &[String]) -> Option<(&String, &String)> {
    match args {
        [first, second] => Some((first, second)),
        _ => None,
    }
}

/// Result of running a [`Query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryAnswer {
    Count(usize),
    Rate(f64),
    Missions(Vec<String>),
    Ranking(Vec<(String, usize)>),
    Statuses(StatusCounts),
    Rocket(Option<String>),
}

impl fmt::Display for QueryAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Rate(value) => f.write_str(ryu::Buffer::new().format(*value)),
            Self::Missions(names) => {
                for name in names {
                    writeln!(f, "{name}")?;
                }
                Ok(())
            }
            Self::Ranking(groups) => {
                for (key, count) in groups {
                    writeln!(f, "{key}\t{count}")?;
                }
                Ok(())
            }
            Self::Statuses(counts) => {
                for (status, count) in counts.entries() {
                    writeln!(f, "{status}: {count}")?;
                }
                Ok(())
            }
            Self::Rocket(rocket) => f.write_str(rocket.as_deref().unwrap_or("")),
        }
    }
}
