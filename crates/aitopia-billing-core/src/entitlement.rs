//! Plan and tool-selection validation

use aitopia_types::Plan;
use chrono::{DateTime, Months, Utc};

use crate::{BillingError, PlanTable};

/// A plan and tool selection that passed every entitlement check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSelection {
    /// Normalized plan
    pub plan: Plan,
    /// Catalog tools, duplicates removed, first occurrence kept
    pub tools: Vec<String>,
}

/// Pure entitlement rules over an injected plan table
#[derive(Debug, Clone, Default)]
pub struct EntitlementPolicy {
    table: PlanTable,
}

impl EntitlementPolicy {
    /// Create a policy over `table`
    pub fn new(table: PlanTable) -> Self {
        Self { table }
    }

    /// The plan table in force
    pub fn table(&self) -> &PlanTable {
        &self.table
    }

    /// Check a requested plan and tool list
    ///
    /// Checks run in order and stop at the first failure: plan name, then
    /// tool names, then tool count against the plan limit.
    pub fn validate(&self, plan: &str, tools: &[String]) -> Result<ValidatedSelection, BillingError> {
        let plan: Plan = plan.parse().map_err(|_| BillingError::InvalidPlan)?;

        let mut selected: Vec<String> = Vec::with_capacity(tools.len());
        let mut invalid: Vec<String> = Vec::new();
        for tool in tools {
            if !self.table.is_catalog_tool(tool) {
                if !invalid.contains(tool) {
                    invalid.push(tool.clone());
                }
            } else if !selected.contains(tool) {
                selected.push(tool.clone());
            }
        }

        if !invalid.is_empty() {
            return Err(BillingError::InvalidTools(invalid));
        }

        if let Some(limit) = self.table.tool_limit(plan) {
            if selected.len() > limit {
                return Err(BillingError::TooManyTools { limit, plan });
            }
        }

        Ok(ValidatedSelection {
            plan,
            tools: selected,
        })
    }

    /// Invoice amount owed when switching to `plan`, if any
    pub fn invoice_amount(&self, plan: Plan) -> Option<i64> {
        self.table.price_cents(plan)
    }
}

/// Billing cycle starting at `start`: one calendar month, clamped to month end
pub fn billing_period(start: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let end = start.checked_add_months(Months::new(1)).unwrap_or(start);
    (start, end)
}
