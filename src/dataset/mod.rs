use time::Date;

use crate::value::{MissionStatus, RocketStatus};

/// One launch as recorded in the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    /// Mission name. Not unique across the dataset.
    pub mission: String,
    pub company: String,
    /// Launch date; `None` when the source value did not parse.
    pub date: Option<Date>,
    pub rocket: String,
    pub rocket_status: Option<RocketStatus>,
    pub mission_status: Option<MissionStatus>,
    /// Launch price in millions; `None` when missing or unparseable.
    pub price: Option<f64>,
}

impl Mission {
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date.map(Date::year)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.mission_status
            .as_ref()
            .is_some_and(MissionStatus::is_success)
    }
}

/// Read-only access to an ordered run of missions.
///
/// Implemented by the full [`Dataset`], by filtered views, and by plain
/// slices so every aggregate works on any of them.
pub trait Rows {
    fn row_count(&self) -> usize;

    fn rows(&self) -> impl Iterator<Item = &Mission>;
}

impl Rows for [Mission] {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn rows(&self) -> impl Iterator<Item = &Mission> {
        self.iter()
    }
}

/// Immutable in-memory mission table, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    missions: Vec<Mission>,
}

impl Dataset {
    #[must_use]
    pub const fn new(missions: Vec<Mission>) -> Self {
        Self { missions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.missions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    #[must_use]
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Mission> {
        self.missions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mission> {
        self.missions.iter()
    }
}

impl Rows for Dataset {
    fn row_count(&self) -> usize {
        self.missions.len()
    }

    fn rows(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }
}

impl FromIterator<Mission> for Dataset {
    fn from_iter<I: IntoIterator<Item = Mission>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Mission;
    type IntoIter = std::slice::Iter<'a, Mission>;

    fn into_iter(self) -> Self::IntoIter {
        self.missions.iter()
    }
}
