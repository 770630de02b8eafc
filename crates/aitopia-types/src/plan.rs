//! Subscription plan types

use serde::{Deserialize, Serialize};

/// Subscription plan tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free tier - up to 3 tools
    Starter,
    /// Pro tier - $49/mo, up to 8 tools
    Pro,
    /// Enterprise tier - $149/mo, every tool
    Enterprise,
}

impl Plan {
    /// All plans, cheapest first
    pub const ALL: [Plan; 3] = [Self::Starter, Self::Pro, Self::Enterprise];

    /// Lower-case plan name as stored and returned to clients
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }

    /// Default number of tools a plan may select (`None` means unbounded)
    pub const fn default_tool_limit(&self) -> Option<usize> {
        match self {
            Self::Starter => Some(3),
            Self::Pro => Some(8),
            Self::Enterprise => None,
        }
    }

    /// Default monthly price in cents (`None` for free plans)
    pub const fn default_price_cents(&self) -> Option<i64> {
        match self {
            Self::Starter => None,
            Self::Pro => Some(4_900),
            Self::Enterprise => Some(14_900),
        }
    }

    /// Human-readable plan label, e.g. "Pro"
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Pro => "Pro",
            Self::Enterprise => "Enterprise",
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::Starter
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = PlanParseError;

    /// Parse a plan name, ignoring ASCII case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|plan| plan.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PlanParseError(s.to_string()))
    }
}

/// Error parsing a plan string
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid plan: {0}")]
pub struct PlanParseError(pub String);
