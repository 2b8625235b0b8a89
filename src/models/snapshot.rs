use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured historical state of the target website, keyed by commit hash.
/// Records are created by the capture pipeline and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hash: String,
    pub message: String,
    pub author: String,
    #[serde(with = "lenient_date")]
    pub date: DateTime<Utc>,
    pub folder: String,
    pub has_screenshot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotContents {
    pub hash: String,
    pub files: Vec<String>,
}

/// Date parsing that degrades instead of failing: an unparseable date in the
/// index maps to the Unix epoch so one bad record cannot take down the whole
/// index fetch.
mod lenient_date {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH))
    }
}

impl Snapshot {
    /// Short display date, e.g. "3 May 2024".
    pub fn display_date(&self) -> String {
        self.date.format("%-d %b %Y").to_string()
    }

    /// Display time of day, e.g. "14:07".
    pub fn display_time(&self) -> String {
        self.date.format("%H:%M").to_string()
    }
}
