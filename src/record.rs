use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// One row of the dataset.
///
/// Records are sanitized and validated by the loader; once constructed they
/// are only moved around by the sort engine, never modified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Record {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl Record {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Orders two records on a single key column.
    pub fn cmp_by(&self, other: &Record, key: SortKey) -> Ordering {
        match key {
            SortKey::Id => self.id.cmp(&other.id),
            SortKey::FirstName => self.first_name.as_str().cmp(other.first_name.as_str()),
            SortKey::LastName => self.last_name.as_str().cmp(other.last_name.as_str()),
        }
    }

    pub fn key_string(&self, key: SortKey) -> String {
        match key {
            SortKey::Id => self.id.to_string(),
            SortKey::FirstName => self.first_name.clone(),
            SortKey::LastName => self.last_name.clone(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.first_name, self.last_name)
    }
}

/// Column a run compares on. Fixed for the duration of one sort call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    FirstName,
    LastName,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Id, SortKey::FirstName, SortKey::LastName];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::FirstName => "First Name",
            SortKey::LastName => "Last Name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" | "1" => Ok(SortKey::Id),
            "first" | "first-name" | "first_name" | "firstname" | "2" => Ok(SortKey::FirstName),
            "last" | "last-name" | "last_name" | "lastname" | "3" => Ok(SortKey::LastName),
            other => Err(format!(
                "Unknown sort key '{}' (expected id, first-name or last-name)",
                other
            )),
        }
    }
}
