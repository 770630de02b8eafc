//! Plan table configuration

use aitopia_types::{Plan, Tool};
use std::collections::HashMap;

/// Terms attached to a single plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTerms {
    /// Maximum number of selected tools (`None` is unbounded)
    pub tool_limit: Option<usize>,
    /// Monthly price in cents (`None` means no invoice is issued)
    pub price_cents: Option<i64>,
}

impl PlanTerms {
    fn defaults_for(plan: Plan) -> Self {
        Self {
            tool_limit: plan.default_tool_limit(),
            price_cents: plan.default_price_cents(),
        }
    }
}

/// Plan limits, prices and the tool catalog
///
/// `Default` reproduces the published table: starter 3 tools free, pro 8
/// tools at $49, enterprise unbounded at $149, ten catalog tools.
#[derive(Debug, Clone)]
pub struct PlanTable {
    terms: HashMap<Plan, PlanTerms>,
    catalog: Vec<String>,
}

impl PlanTable {
    /// Set the tool limit for a plan
    pub fn with_tool_limit(mut self, plan: Plan, limit: Option<usize>) -> Self {
        self.entry(plan).tool_limit = limit;
        self
    }

    /// Set the price for a plan
    pub fn with_price(mut self, plan: Plan, price_cents: Option<i64>) -> Self {
        self.entry(plan).price_cents = price_cents;
        self
    }

    /// Replace the tool catalog
    pub fn with_catalog<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Terms for a plan
    pub fn terms(&self, plan: Plan) -> PlanTerms {
        self.terms
            .get(&plan)
            .copied()
            .unwrap_or_else(|| PlanTerms::defaults_for(plan))
    }

    /// Tool limit for a plan
    pub fn tool_limit(&self, plan: Plan) -> Option<usize> {
        self.terms(plan).tool_limit
    }

    /// Price for a plan
    pub fn price_cents(&self, plan: Plan) -> Option<i64> {
        self.terms(plan).price_cents
    }

    /// Whether `name` is a catalog tool (exact, case-sensitive match)
    pub fn is_catalog_tool(&self, name: &str) -> bool {
        self.catalog.iter().any(|t| t == name)
    }

    /// Catalog tool names
    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    fn entry(&mut self, plan: Plan) -> &mut PlanTerms {
        self.terms
            .entry(plan)
            .or_insert_with(|| PlanTerms::defaults_for(plan))
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self {
            terms: Plan::ALL
                .into_iter()
                .map(|plan| (plan, PlanTerms::defaults_for(plan)))
                .collect(),
            catalog: Tool::ALL.iter().map(|t| t.as_str().to_string()).collect(),
        }
    }
}
