//! Subscription types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Plan};

/// Subscription status
///
/// Accounts start `Inactive` and move to `Active` on their first successful
/// update. There is no transition back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// At least one update has been applied
    Active,
    /// Never updated since signup
    Inactive,
}

impl SubscriptionStatus {
    /// Lower-case status name as stored
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Read a possibly-missing stored status; absent or unknown values are inactive
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::Inactive
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}

/// Error parsing a subscription status
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid subscription status: {0}")]
pub struct StatusParseError(pub String);

/// Subscription state embedded in an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Owning account
    pub account_id: AccountId,
    /// Current plan
    pub plan: Plan,
    /// Selected tool names (a set; order carries no meaning)
    pub selected_tools: Vec<String>,
    /// Subscription status
    pub status: SubscriptionStatus,
    /// Start of the current billing cycle
    pub start_date: Option<DateTime<Utc>>,
    /// End of the current billing cycle
    pub end_date: Option<DateTime<Utc>>,
    /// Write counter, bumped on every update
    pub version: i64,
}

impl Subscription {
    /// Full view returned after an update
    pub fn to_view(&self) -> SubscriptionView {
        SubscriptionView {
            status: self.status,
            plan: self.plan,
            selected_tools: self.selected_tools.clone(),
            start_date: self.start_date.map(format_timestamp),
            end_date: self.end_date.map(format_timestamp),
        }
    }

    /// Summary view returned by reads
    pub fn to_summary(&self) -> SubscriptionSummary {
        SubscriptionSummary {
            plan: self.plan,
            selected_tools: self.selected_tools.clone(),
            status: self.status,
        }
    }
}

/// Subscription as returned by a successful update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub status: SubscriptionStatus,
    pub plan: Plan,
    pub selected_tools: Vec<String>,
    /// RFC 3339 timestamp
    pub start_date: Option<String>,
    /// RFC 3339 timestamp
    pub end_date: Option<String>,
}

/// Subscription as returned by `GET /subscription`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub plan: Plan,
    pub selected_tools: Vec<String>,
    pub status: SubscriptionStatus,
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
