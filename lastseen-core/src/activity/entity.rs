use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::interface::ActivityError;

/// platform stored when the client does not tell one.
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Unique identifier of a tracked user. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = ActivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ActivityError::client_error("userId is required"));
        }
        Ok(Self(s.to_owned()))
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserId::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The stored record: one per user id, overwritten on every ping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivity {
    #[serde(rename = "userId")]
    pub user_id: UserId,

    #[serde(rename = "lastSeen", serialize_with = "serialize_iso_millis")]
    pub last_seen: DateTime<Utc>,

    #[serde(rename = "platform")]
    pub platform: String,
}

impl UserActivity {
    /// new record seen now. Missing or empty platform becomes "unknown".
    /// `last_seen` is cut to milliseconds, the precision every backend keeps.
    pub fn seen_now(user_id: UserId, platform: Option<String>) -> Self {
        Self {
            user_id,
            last_seen: Utc::now().trunc_subsecs(3),
            platform: platform_or_unknown(platform),
        }
    }

    pub fn into_entry(self) -> (UserId, Activity) {
        (
            self.user_id,
            Activity {
                last_seen: self.last_seen,
                platform: self.platform,
            },
        )
    }
}

/// Value of the listing, keyed by user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "lastSeen", serialize_with = "serialize_iso_millis")]
    pub last_seen: DateTime<Utc>,

    #[serde(rename = "platform", default = "unknown_platform")]
    pub platform: String,
}

/// Every tracked user, keyed by user id.
pub type UsersActivity = BTreeMap<UserId, Activity>;

pub(crate) fn platform_or_unknown(platform: Option<String>) -> String {
    platform
        .filter(|p| !p.is_empty())
        .unwrap_or_else(unknown_platform)
}

fn unknown_platform() -> String {
    UNKNOWN_PLATFORM.to_string()
}

// serialize into YYYY-MM-DDThh:mm:ss.sssZ
pub fn serialize_iso_millis<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
