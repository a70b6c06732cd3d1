mod common;

use space_missions::Dataset;
use space_missions::aggregate::{GroupKey, count_by_group};
use space_missions::queries::{
    Query, QueryAnswer, QueryKind, average_missions_per_year, mission_count_by_company,
    mission_status_counts, missions_in_date_range, missions_in_year, most_used_rocket,
    success_rate_by_company, top_companies_by_count,
};

use common::{mission, sample, scenario};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn company_counts_partition_the_dataset() {
    let dataset = sample();
    let total: usize = count_by_group(&dataset, GroupKey::Company)
        .iter()
        .map(|(company, _)| mission_count_by_company(&dataset, company))
        .sum();
    assert_eq!(total, dataset.len());
    assert_eq!(mission_count_by_company(&dataset, "SpaceX"), 3);
    assert_eq!(mission_count_by_company(&dataset, "spacex"), 0);
    assert_eq!(mission_count_by_company(&dataset, ""), 0);
}

#[test]
fn success_rates_are_bounded_percentages() {
    let dataset = sample();
    for (company, _) in count_by_group(&dataset, GroupKey::Company) {
        let rate = success_rate_by_company(&dataset, &company);
        assert!((0.0..=100.0).contains(&rate), "{company}: {rate}");
    }
    assert_eq!(success_rate_by_company(&dataset, "SpaceX"), 66.67);
    assert_eq!(success_rate_by_company(&dataset, "RVSN USSR"), 100.0);
    assert_eq!(success_rate_by_company(&dataset, "US Navy"), 0.0);
    assert_eq!(success_rate_by_company(&dataset, "Blue Origin"), 0.0);
    assert_eq!(success_rate_by_company(&Dataset::default(), "SpaceX"), 0.0);
}

#[test]
fn date_range_is_inclusive_and_sorted() {
    let dataset = sample();
    let names = missions_in_date_range(&dataset, "2020-01-01", "2020-01-31");
    assert_eq!(
        names,
        [
            "Starlink V1 L2",
            "TJS-5",
            "Eutelsat Konnect & GSAT-30",
            "Crew Dragon Inflight Abort Test",
        ]
    );

    let single_day = missions_in_date_range(&dataset, "2020-01-07", "2020-01-07");
    assert_eq!(single_day, ["Starlink V1 L2", "TJS-5"]);

    let everything = missions_in_date_range(&dataset, "1900-01-01", "2100-01-01");
    assert_eq!(everything.len(), 11, "the undated launch never matches");
    assert_eq!(everything.first(), Some(&"Sputnik-1"));
    assert_eq!(everything.get(5), Some(&"Amos-6"));
    assert_eq!(everything.last(), Some(&"Pics Or It Didn't Happen"));
}

#[test]
fn date_range_bounds_honour_time_of_day() {
    let dataset = sample();
    let names = missions_in_date_range(&dataset, "2020-01-07 12:00:00", "2020-01-16T00:00:00");
    assert_eq!(names, ["Eutelsat Konnect & GSAT-30"]);
}

#[test]
fn date_range_bounds_accept_common_spellings() {
    let dataset = sample();
    assert_eq!(
        missions_in_date_range(&dataset, "2020/01/07", "2020-01-16 12:00"),
        ["Starlink V1 L2", "TJS-5", "Eutelsat Konnect & GSAT-30"]
    );
}

#[test]
fn invalid_date_ranges_are_empty() {
    let dataset = sample();
    assert!(missions_in_date_range(&dataset, "2020-02-01", "2020-01-01").is_empty());
    assert!(missions_in_date_range(&dataset, "yesterday", "2020-01-01").is_empty());
    assert!(missions_in_date_range(&dataset, "2020-01-01", "").is_empty());
}

#[test]
fn top_companies_break_ties_by_name() {
    let dataset = sample();
    assert_eq!(
        top_companies_by_count(&dataset, 3),
        vec![
            ("SpaceX".to_string(), 3),
            ("CASC".to_string(), 2),
            ("RVSN USSR".to_string(), 2),
        ]
    );

    let all = top_companies_by_count(&dataset, 100);
    assert_eq!(all.len(), 7);
    assert!(all.windows(2).all(|pair| {
        pair[0].1 > pair[1].1 || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0)
    }));

    assert!(top_companies_by_count(&dataset, 0).is_empty());
    assert!(top_companies_by_count(&dataset, -4).is_empty());
}

#[test]
fn status_counts_cover_every_known_outcome() {
    let counts = mission_status_counts(&sample());
    assert_eq!(counts.success, 7);
    assert_eq!(counts.failure, 3);
    assert_eq!(counts.partial_failure, 1);
    assert_eq!(counts.prelaunch_failure, 1);
    assert_eq!(counts.total(), 12);

    let empty = mission_status_counts(&scenario());
    assert_eq!(empty.partial_failure, 0);
    assert_eq!(empty.prelaunch_failure, 0);
}

#[test]
fn unexpected_and_missing_statuses_are_not_counted() {
    let dataset = Dataset::new(vec![
        mission("A", "2020-01-01", "Success"),
        mission("A", "2020-01-02", "Scrubbed"),
        mission("A", "2020-01-03", ""),
    ]);
    let counts = mission_status_counts(&dataset);
    assert_eq!(counts.total(), 1);
    assert_eq!(success_rate_by_company(&dataset, "A"), 33.33);
}

#[test]
fn year_counts_and_averages() {
    let dataset = sample();
    assert_eq!(missions_in_year(&dataset, 1957), 3);
    assert_eq!(missions_in_year(&dataset, 2020), 5);
    assert_eq!(missions_in_year(&dataset, 1999), 0);

    assert_eq!(average_missions_per_year(&dataset, 1957, 1958), 2.5);
    assert_eq!(average_missions_per_year(&dataset, 2016, 2020), 1.2);
    assert_eq!(average_missions_per_year(&dataset, 2020, 2020), 5.0);
    assert_eq!(average_missions_per_year(&dataset, 2021, 2020), 0.0);
    assert_eq!(average_missions_per_year(&dataset, i32::MIN, i32::MAX), 0.0);
}

#[test]
fn averages_round_exact_halves_to_even() {
    let launches: Vec<_> = (2000..=2007)
        .map(|year| mission("A", &format!("{year}-03-01"), "Success"))
        .chain(std::iter::once(mission("A", "2004-09-01", "Failure")))
        .collect();
    let dataset = Dataset::new(launches);
    assert_eq!(missions_in_year(&dataset, 2004), 2);
    assert_eq!(average_missions_per_year(&dataset, 2000, 2007), 1.12);
    assert_eq!(success_rate_by_company(&dataset, "A"), 88.89);
}

#[test]
fn most_used_rocket_prefers_earlier_name_on_ties() {
    assert_eq!(most_used_rocket(&sample()).as_deref(), Some("Falcon 9 Block 5"));
    assert_eq!(most_used_rocket(&Dataset::default()), None);
}

#[test]
fn query_names_accept_several_spellings() {
    for kind in QueryKind::ALL {
        assert_eq!(kind.name().parse::<QueryKind>(), Ok(kind));
    }
    assert_eq!(
        "getMissionCountByCompany".parse(),
        Ok(QueryKind::MissionCountByCompany)
    );
    assert_eq!("getSuccessRate".parse(), Ok(QueryKind::SuccessRateByCompany));
    assert_eq!(
        "top_companies_by_mission_count".parse(),
        Ok(QueryKind::TopCompaniesByCount)
    );
    assert!("launchWeather".parse::<QueryKind>().is_err());
}

#[test]
fn dispatcher_runs_typed_queries() {
    let dataset = scenario();
    let run = |kind, values: &[&str]| Query::parse(kind, &args(values)).run(&dataset);

    assert_eq!(
        run(QueryKind::MissionCountByCompany, &["CompanyA"]),
        QueryAnswer::Count(2)
    );
    assert_eq!(
        run(QueryKind::SuccessRateByCompany, &["CompanyA"]),
        QueryAnswer::Rate(50.0)
    );
    assert_eq!(
        run(QueryKind::TopCompaniesByCount, &["1"]),
        QueryAnswer::Ranking(vec![("CompanyA".into(), 2)])
    );
    assert_eq!(run(QueryKind::MissionsInYear, &["2021"]), QueryAnswer::Count(1));
    assert_eq!(
        run(QueryKind::AverageMissionsPerYear, &["2020", "2021"]),
        QueryAnswer::Rate(1.5)
    );
    assert_eq!(
        run(QueryKind::MissionsInDateRange, &["2020-01-01", "2020-12-31"]),
        QueryAnswer::Missions(vec![
            "CompanyA 2020-01-01".into(),
            "CompanyA 2020-06-01".into()
        ])
    );
    assert_eq!(
        run(QueryKind::MostUsedRocket, &[]),
        QueryAnswer::Rocket(Some("Generic".into()))
    );
}

#[test]
fn dispatcher_returns_defaults_for_malformed_arguments() {
    let dataset = scenario();
    let run = |kind, values: &[&str]| Query::parse(kind, &args(values)).run(&dataset);

    assert_eq!(run(QueryKind::MissionsInYear, &["true"]), QueryAnswer::Count(0));
    assert_eq!(run(QueryKind::MissionsInYear, &["False"]), QueryAnswer::Count(0));
    assert_eq!(run(QueryKind::MissionsInYear, &["2020.0"]), QueryAnswer::Count(0));
    assert_eq!(
        run(QueryKind::TopCompaniesByCount, &["true"]),
        QueryAnswer::Ranking(Vec::new())
    );
    assert_eq!(
        run(QueryKind::TopCompaniesByCount, &["2.5"]),
        QueryAnswer::Ranking(Vec::new())
    );
    assert_eq!(
        run(QueryKind::AverageMissionsPerYear, &["2020", "true"]),
        QueryAnswer::Rate(0.0)
    );
    assert_eq!(
        run(QueryKind::AverageMissionsPerYear, &["2020"]),
        QueryAnswer::Rate(0.0)
    );
    assert_eq!(
        run(QueryKind::MissionCountByCompany, &[]),
        QueryAnswer::Count(0)
    );
    assert_eq!(
        run(QueryKind::SuccessRateByCompany, &["CompanyA", "CompanyB"]),
        QueryAnswer::Rate(0.0)
    );
    assert_eq!(
        run(QueryKind::MissionsInDateRange, &["2020-01-01"]),
        QueryAnswer::Missions(Vec::new())
    );
}

#[test]
fn answers_render_as_text() {
    assert_eq!(QueryAnswer::Rate(50.0).to_string(), "50.0");
    assert_eq!(QueryAnswer::Rate(66.67).to_string(), "66.67");
    assert_eq!(QueryAnswer::Count(3).to_string(), "3");
    assert_eq!(
        QueryAnswer::Ranking(vec![("SpaceX".into(), 3)]).to_string(),
        "SpaceX\t3\n"
    );
    assert_eq!(QueryAnswer::Rocket(None).to_string(), "");
}
