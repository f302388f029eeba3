use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::auth::PosType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: Option<BillingCycle>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub pos_type: Option<PosType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub package: Option<Value>,
    #[serde(default, deserialize_with = "backend_date::deserialize_option")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "backend_date::deserialize")]
    pub end_date: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Dates as the backend writes them: RFC 3339, a naive datetime taken as
/// UTC, or a bare calendar date at midnight UTC.
pub(crate) mod backend_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        if let Some(date) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return Some(date.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|date| date.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("unrecognized date: {}", raw)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unrecognized date: {}", raw))),
        }
    }
}

/// How close a subscription is to running out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionStatus {
    None,
    Expired,
    ExpiringSoon { days_left: i64 },
    Active,
}

const EXPIRY_WARNING_DAYS: i64 = 7;

impl SubscriptionStatus {
    pub fn of(subscription: Option<&Subscription>, now: DateTime<Utc>) -> Self {
        match subscription {
            None => SubscriptionStatus::None,
            Some(sub) => sub.status_at(now),
        }
    }
}

impl Subscription {
    /// Whole days left, rounded up; zero or less means expired.
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        const DAY_MS: i64 = 24 * 60 * 60 * 1000;
        let ms = (self.end_date - now).num_milliseconds();
        ms.div_euclid(DAY_MS) + i64::from(ms.rem_euclid(DAY_MS) != 0)
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        match self.days_left(now) {
            d if d <= 0 => SubscriptionStatus::Expired,
            d if d <= EXPIRY_WARNING_DAYS => SubscriptionStatus::ExpiringSoon { days_left: d },
            _ => SubscriptionStatus::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub pos_type: Option<PosType>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Store {
    /// The id as it appears in `/stores/{id}` paths.
    pub fn path_id(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Fields for creating or updating a store; unset fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_type: Option<PosType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Stores plus the current subscription, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stores: Vec<Store>,
    pub subscription: Option<Subscription>,
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct PackagesResponse {
    #[serde(default)]
    pub packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubscriptionResponse {
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoresResponse {
    #[serde(default)]
    pub stores: Vec<Store>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StoreResponse {
    pub store: Store,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscribeRequest<'a> {
    pub package_id: &'a Value,
}
