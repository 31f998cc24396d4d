use serde::{Deserialize, Serialize};

/// Filing status used to select an entry from a jurisdiction table.
///
/// Jurisdiction files key their per-status parameters by [`FilingStatus::as_str`].
/// Statuses without a named variant are kept verbatim in [`FilingStatus::Other`]
/// and resolve like any other key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilingStatus {
    Single,
    #[default]
    Joint,
    Separate,
    HeadOfHousehold,
    Other(String),
}

impl FilingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Single => "single",
            Self::Joint => "joint",
            Self::Separate => "separate",
            Self::HeadOfHousehold => "head_of_household",
            Self::Other(name) => name,
        }
    }

    /// Reads a status name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Self {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "single" => Self::Single,
            "joint" => Self::Joint,
            "separate" => Self::Separate,
            "head_of_household" => Self::HeadOfHousehold,
            _ => Self::Other(name),
        }
    }

    pub fn is_joint(&self) -> bool {
        *self == Self::Joint
    }
}

impl From<String> for FilingStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<FilingStatus> for String {
    fn from(status: FilingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
