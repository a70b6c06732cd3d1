use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome recorded for a launch.
///
/// Labels outside the four known outcomes are kept verbatim in `Other` so
/// they can still be displayed and selected, but they never land in a
/// histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MissionStatus {
    Success,
    Failure,
    PartialFailure,
    PrelaunchFailure,
    Other(String),
}

impl MissionStatus {
    /// The four outcomes every histogram reports, in display order.
    pub const KNOWN: [Self; 4] = [
        Self::Success,
        Self::Failure,
        Self::PartialFailure,
        Self::PrelaunchFailure,
    ];

    /// Maps a raw source label to a status. Empty text is a missing status.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let status = match label {
            "" => return None,
            "Success" => Self::Success,
            "Failure" => Self::Failure,
            "Partial Failure" => Self::PartialFailure,
            "Prelaunch Failure" => Self::PrelaunchFailure,
            other => Self::Other(other.to_owned()),
        };
        Some(status)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::PartialFailure => "Partial Failure",
            Self::PrelaunchFailure => "Prelaunch Failure",
            Self::Other(label) => label,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MissionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Whether the launch vehicle is still flying.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RocketStatus {
    Active,
    Retired,
    Other(String),
}

impl RocketStatus {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let status = match label {
            "" => return None,
            "Active" => Self::Active,
            "Retired" => Self::Retired,
            other => Self::Other(other.to_owned()),
        };
        Some(status)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Retired => "Retired",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for RocketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RocketStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
