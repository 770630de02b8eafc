//! Property-based tests for the entitlement policy
//!
//! These tests verify the selection rules:
//! - Any subset of the catalog within the plan limit is accepted
//! - Any selection above the limit is rejected with the limit named
//! - Any non-catalog name is rejected before the count check
//! - Plan names parse regardless of case

use aitopia_billing_core::{BillingError, EntitlementPolicy, PlanTable};
use aitopia_types::{Plan, Tool};
use proptest::prelude::*;
use proptest::sample::subsequence;

// ============================================================================
// Strategies
// ============================================================================

fn catalog() -> Vec<String> {
    Tool::ALL.iter().map(|t| t.as_str().to_string()).collect()
}

fn arb_plan() -> impl Strategy<Value = Plan> {
    prop_oneof![Just(Plan::Starter), Just(Plan::Pro), Just(Plan::Enterprise)]
}

/// Distinct catalog tools of any size
fn arb_selection() -> impl Strategy<Value = Vec<String>> {
    subsequence(catalog(), 0..=10)
}

/// Names that are not in the catalog
fn arb_unknown_tool() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_filter("must not be a catalog name", |s| Tool::from_name(s).is_none())
}

/// Mixed-case spelling of a plan name
fn arb_plan_spelling() -> impl Strategy<Value = (String, Plan)> {
    (arb_plan(), proptest::collection::vec(any::<bool>(), 10)).prop_map(|(plan, upper)| {
        let spelled = plan
            .as_str()
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect::<String>();
        (spelled, plan)
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: acceptance is exactly "size within limit"
    #[test]
    fn prop_limit_decides_acceptance(plan in arb_plan(), tools in arb_selection()) {
        let policy = EntitlementPolicy::default();
        let limit = PlanTable::default().tool_limit(plan);
        let result = policy.validate(plan.as_str(), &tools);

        match limit {
            Some(limit) if tools.len() > limit => {
                let rejected_with_limit = matches!(
                    result,
                    Err(BillingError::TooManyTools { limit: l, plan: p }) if l == limit && p == plan
                );
                prop_assert!(rejected_with_limit);
            }
            _ => {
                let selection = result.unwrap();
                prop_assert_eq!(selection.plan, plan);
                prop_assert_eq!(selection.tools, tools);
            }
        }
    }

    /// Property: an unknown name is always reported, whatever else is selected
    #[test]
    fn prop_unknown_tool_always_rejected(
        plan in arb_plan(),
        mut tools in arb_selection(),
        bad in arb_unknown_tool(),
        at in any::<prop::sample::Index>(),
    ) {
        let idx = at.index(tools.len() + 1);
        tools.insert(idx, bad.clone());

        let result = EntitlementPolicy::default().validate(plan.as_str(), &tools);
        match result {
            Err(BillingError::InvalidTools(names)) => prop_assert_eq!(names, vec![bad]),
            other => prop_assert!(false, "expected InvalidTools, got {:?}", other),
        }
    }

    /// Property: plan names are case-insensitive
    #[test]
    fn prop_plan_case_insensitive((spelled, plan) in arb_plan_spelling()) {
        let selection = EntitlementPolicy::default().validate(&spelled, &[]).unwrap();
        prop_assert_eq!(selection.plan, plan);
    }

    /// Property: duplicates never count twice
    #[test]
    fn prop_duplicates_collapse(tools in subsequence(catalog(), 0..=3)) {
        let doubled: Vec<String> = tools.iter().chain(tools.iter()).cloned().collect();
        let selection = EntitlementPolicy::default().validate("starter", &doubled).unwrap();
        prop_assert_eq!(selection.tools, tools);
    }
}
