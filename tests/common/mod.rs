#![allow(dead_code)]

use std::io::Write;

use space_missions::parser::parse_date;
use space_missions::{Dataset, Mission, MissionStatus, MissionsFile, RocketStatus};
use tempfile::NamedTempFile;

/// Twelve launches laid out like the public space-missions table, including
/// quoted locations, currency-formatted prices, a bad date, and a bad price.
pub const SAMPLE_CSV: &str = "\
Company,Location,Date,Time,Rocket,Mission,RocketStatus,Price,MissionStatus
RVSN USSR,\"Site 1/5, Baikonur Cosmodrome, Kazakhstan\",1957-10-04,19:28:00,Sputnik 8K71PS,Sputnik-1,Retired,,Success
RVSN USSR,\"Site 1/5, Baikonur Cosmodrome, Kazakhstan\",1957-11-03,02:30:00,Sputnik 8K71PS,Sputnik-2,Retired,,Success
US Navy,\"LC-18A, Cape Canaveral AFS, Florida, USA\",1957-12-06,16:44:00,Vanguard,Vanguard TV3,Retired,,Failure
AMBA,\"LC-26A, Cape Canaveral AFS, Florida, USA\",1958-02-01,03:48:00,Juno I,Explorer 1,Retired,,Success
US Navy,\"LC-18A, Cape Canaveral AFS, Florida, USA\",1958-02-05,07:33:00,Vanguard,Vanguard TV3BU,Retired,,Failure
SpaceX,\"SLC-40, Cape Canaveral SFS, Florida, USA\",2020-01-07,02:19:00,Falcon 9 Block 5,Starlink V1 L2,Active,50.0,Success
CASC,\"LC-3, Xichang Satellite Launch Center, China\",2020-01-07,15:20:00,Long March 3B/E,TJS-5,Active,29.75,Success
SpaceX,\"LC-39A, Kennedy Space Center, Florida, USA\",2020-01-19,15:30:00,Falcon 9 Block 5,Crew Dragon Inflight Abort Test,Active,50.0,Success
Arianespace,\"ELA-3, Guiana Space Centre, French Guiana, France\",2020-01-16,21:05:00,Ariane 5 ECA,Eutelsat Konnect & GSAT-30,Active,\"$1,160.0\",Success
Rocket Lab,\"LC-1A, Rocket Lab LC1, New Zealand\",2020-07-04,21:19:00,Electron/Curie,Pics Or It Didn't Happen,Active,7.5,Failure
CASC,\"LC-9, Taiyuan Satellite Launch Center, China\",not-a-date,,Long March 2D,Unknown Date Mission,Active,n/a,Partial Failure
SpaceX,\"SLC-40, Cape Canaveral AFS, Florida, USA\",2016-09-01,13:07:00,Falcon 9 v1.2,Amos-6,Retired,62.0,Prelaunch Failure
";

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("create temp csv");
    write!(tmp, "{contents}").expect("write temp csv");
    tmp.flush().expect("flush temp csv");
    tmp
}

pub fn load_str(contents: &str) -> Dataset {
    let (dataset, _summary) = MissionsFile::from_reader(contents.as_bytes())
        .load()
        .expect("fixture should load");
    dataset
}

pub fn sample() -> Dataset {
    load_str(SAMPLE_CSV)
}

/// Builds a record with placeholder mission and rocket names.
pub fn mission(company: &str, date: &str, status: &str) -> Mission {
    Mission {
        mission: format!("{company} {date}"),
        company: company.to_owned(),
        date: parse_date(date),
        rocket: "Generic".to_owned(),
        rocket_status: Some(RocketStatus::Active),
        mission_status: MissionStatus::from_label(status),
        price: None,
    }
}

/// The three-launch example: two CompanyA launches in 2020, one CompanyB launch in 2021.
pub fn scenario() -> Dataset {
    Dataset::new(vec![
        mission("CompanyA", "2020-01-01", "Success"),
        mission("CompanyA", "2020-06-01", "Failure"),
        mission("CompanyB", "2021-01-01", "Success"),
    ])
}
