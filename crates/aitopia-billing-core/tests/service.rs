//! Billing service tests over in-memory repositories

mod common;

use aitopia_billing_core::{BillingError, PlanTable, SubscriptionRequest};
use aitopia_db::InvoiceRow;
use aitopia_types::{AccountId, InvoiceStatus, Plan, SubscriptionStatus};
use chrono::{Duration, Months, Utc};
use common::{request, seed_account, service, service_with_table};
use uuid::Uuid;

// ============================================================================
// updateSubscription
// ============================================================================

#[tokio::test]
async fn starter_with_three_tools_activates_without_invoice() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let outcome = billing
        .update_subscription(&id, request("starter", &["VoiceCraft", "NeuroChat", "VisionX"]))
        .await
        .unwrap();

    let sub = outcome.subscription;
    assert_eq!(sub.plan, Plan::Starter);
    assert_eq!(sub.status, SubscriptionStatus::Active);
    assert_eq!(sub.selected_tools, vec!["VoiceCraft", "NeuroChat", "VisionX"]);
    assert!(outcome.invoice.is_none());
    assert_eq!(store.invoice_count(id.0), 0);
}

#[tokio::test]
async fn pro_update_issues_paid_invoice() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let outcome = billing
        .update_subscription(&id, request("Pro", &["VoiceCraft", "NeuroChat"]))
        .await
        .unwrap();

    assert_eq!(outcome.subscription.plan, Plan::Pro);
    let invoice = outcome.invoice.expect("pro plan is invoiced");
    assert_eq!(invoice.amount_cents, 4_900);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.description, "Pro Plan Subscription");

    let invoices = billing.get_invoices(&id).await.unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].to_view().amount, "$49.00");
}

#[tokio::test]
async fn enterprise_accepts_whole_catalog() {
    let (billing, store) = service();
    let id = seed_account(&store);
    let all: Vec<String> = billing.policy().table().catalog().to_vec();

    let outcome = billing
        .update_subscription(
            &id,
            SubscriptionRequest {
                plan: Some("enterprise".into()),
                selected_tools: Some(all),
            },
        )
        .await
        .unwrap();

    assert_eq!(outcome.subscription.selected_tools.len(), 10);
    assert_eq!(outcome.invoice.unwrap().amount_cents, 14_900);
}

#[tokio::test]
async fn cycle_is_one_calendar_month() {
    let (billing, store) = service();
    let id = seed_account(&store);
    let before = Utc::now();

    let sub = billing
        .update_subscription(&id, request("starter", &[]))
        .await
        .unwrap()
        .subscription;

    let start = sub.start_date.unwrap();
    let end = sub.end_date.unwrap();
    assert!(start >= before && start - before < Duration::seconds(5));
    assert_eq!(end, start.checked_add_months(Months::new(1)).unwrap());
}

#[tokio::test]
async fn too_many_tools_for_starter_writes_nothing() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let err = billing
        .update_subscription(
            &id,
            request("starter", &["VoiceCraft", "NeuroChat", "VisionX", "DataMiner"]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Cannot select more than 3 tools for starter plan");
    assert_eq!(store.subscription_version(id.0), Some(0));
    let sub = billing.get_subscription(&id).await.unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Inactive);
    assert!(sub.selected_tools.is_empty());
}

#[tokio::test]
async fn invalid_tool_is_reported_and_nothing_written() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let err = billing
        .update_subscription(&id, request("pro", &["FakeTool"]))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid tools: FakeTool");
    assert_eq!(store.invoice_count(id.0), 0);
    assert_eq!(store.subscription_version(id.0), Some(0));
}

#[tokio::test]
async fn invalid_plan_is_rejected() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let err = billing
        .update_subscription(&id, request("premium", &[]))
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::InvalidPlan));
}

#[tokio::test]
async fn missing_fields_are_invalid_input() {
    let (billing, store) = service();
    let id = seed_account(&store);

    for req in [
        SubscriptionRequest {
            plan: None,
            selected_tools: Some(vec![]),
        },
        SubscriptionRequest {
            plan: Some("premium".into()),
            selected_tools: None,
        },
    ] {
        let err = billing.update_subscription(&id, req).await.unwrap_err();
        assert_eq!(err.to_string(), "Plan and selectedTools array are required");
    }
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let (billing, _store) = service();

    let err = billing
        .update_subscription(&AccountId::new(), request("pro", &["VoiceCraft"]))
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::NotFound));
}

#[tokio::test]
async fn failed_invoice_insert_leaves_subscription_unchanged() {
    let (billing, store) = service();
    let id = seed_account(&store);
    store.fail_invoice_inserts(true);

    let err = billing
        .update_subscription(&id, request("pro", &["VoiceCraft"]))
        .await
        .unwrap_err();

    assert!(err.is_internal());
    let sub = billing.get_subscription(&id).await.unwrap();
    assert_eq!(sub.plan, Plan::Starter);
    assert_eq!(sub.status, SubscriptionStatus::Inactive);
    assert_eq!(store.invoice_count(id.0), 0);
}

#[tokio::test]
async fn every_update_overwrites_and_bumps_version() {
    let (billing, store) = service();
    let id = seed_account(&store);

    billing
        .update_subscription(&id, request("enterprise", &["VoiceCraft", "QuantumCore"]))
        .await
        .unwrap();
    let second = billing
        .update_subscription(&id, request("starter", &["TextGenix"]))
        .await
        .unwrap();

    assert_eq!(second.subscription.version, 2);
    assert_eq!(second.subscription.plan, Plan::Starter);
    assert_eq!(second.subscription.selected_tools, vec!["TextGenix"]);
    assert_eq!(second.subscription.status, SubscriptionStatus::Active);
    assert_eq!(store.invoice_count(id.0), 1);
}

#[tokio::test]
async fn repeating_an_update_keeps_entitlements_and_renews_cycle() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let first = billing
        .update_subscription(&id, request("pro", &["VoiceCraft", "CodeForge"]))
        .await
        .unwrap()
        .subscription;
    let second = billing
        .update_subscription(&id, request("pro", &["VoiceCraft", "CodeForge"]))
        .await
        .unwrap()
        .subscription;

    assert_eq!(second.plan, first.plan);
    assert_eq!(second.selected_tools, first.selected_tools);
    assert_eq!(second.status, SubscriptionStatus::Active);
    assert!(second.start_date.unwrap() >= first.start_date.unwrap());
    assert!(second.end_date.unwrap() >= first.end_date.unwrap());
    assert_eq!(second.version, 2);

    // Each paid update is billed.
    assert_eq!(store.invoice_count(id.0), 2);
    assert_eq!(billing.get_invoices(&id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn custom_plan_table_is_honored() {
    let table = PlanTable::default()
        .with_tool_limit(Plan::Starter, Some(1))
        .with_price(Plan::Pro, None);
    let (billing, store) = service_with_table(table);
    let id = seed_account(&store);

    assert!(matches!(
        billing
            .update_subscription(&id, request("starter", &["VoiceCraft", "NeuroChat"]))
            .await,
        Err(BillingError::TooManyTools { limit: 1, .. })
    ));

    let outcome = billing
        .update_subscription(&id, request("pro", &["VoiceCraft"]))
        .await
        .unwrap();
    assert!(outcome.invoice.is_none());
}

#[tokio::test]
async fn concurrent_updates_end_in_one_complete_state() {
    let (billing, store) = service();
    let id = seed_account(&store);

    let a = {
        let billing = billing.clone();
        tokio::spawn(async move {
            billing
                .update_subscription(&id, request("pro", &["VoiceCraft", "NeuroChat"]))
                .await
        })
    };
    let b = {
        let billing = billing.clone();
        tokio::spawn(async move {
            billing
                .update_subscription(&id, request("enterprise", &["QuantumCore"]))
                .await
        })
    };
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let sub = billing.get_subscription(&id).await.unwrap();
    let consistent = (sub.plan == Plan::Pro && sub.selected_tools == vec!["VoiceCraft", "NeuroChat"])
        || (sub.plan == Plan::Enterprise && sub.selected_tools == vec!["QuantumCore"]);
    assert!(consistent, "interleaved state: {sub:?}");
    assert_eq!(sub.version, 2);
    assert_eq!(store.invoice_count(id.0), 2);
}

// ============================================================================
// getSubscription / getInvoices
// ============================================================================

#[tokio::test]
async fn missing_status_reads_inactive() {
    let (billing, store) = service();
    let id = AccountId::new();
    store.insert_account(id.0, "legacy@example.com", "starter", vec![], None);

    let sub = billing.get_subscription(&id).await.unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Inactive);
}

#[tokio::test]
async fn get_subscription_unknown_account() {
    let (billing, _store) = service();
    assert!(matches!(
        billing.get_subscription(&AccountId::new()).await,
        Err(BillingError::NotFound)
    ));
}

#[tokio::test]
async fn invoices_listed_newest_first() {
    let (billing, store) = service();
    let id = seed_account(&store);
    let now = Utc::now();

    for (days_ago, cents) in [(40, 4_900), (2, 14_900), (70, 4_900)] {
        store.insert_invoice(InvoiceRow {
            id: Uuid::new_v4(),
            account_id: id.0,
            date: now - Duration::days(days_ago),
            description: "Pro Plan Subscription".into(),
            amount_cents: cents,
            status: "Paid".into(),
        });
    }

    let invoices = billing.get_invoices(&id).await.unwrap();
    assert_eq!(invoices.len(), 3);
    assert!(invoices.windows(2).all(|w| w[0].date >= w[1].date));
    assert_eq!(invoices[0].amount_cents, 14_900);
}

#[tokio::test]
async fn invoices_empty_for_new_account() {
    let (billing, store) = service();
    let id = seed_account(&store);
    assert!(billing.get_invoices(&id).await.unwrap().is_empty());
}

// ============================================================================
// Account lifecycle
// ============================================================================

#[tokio::test]
async fn provision_is_idempotent() {
    let (billing, _store) = service();
    let id = AccountId::new();

    let (account, created) = billing
        .provision_account(&id, "Ada@Example.com", "Ada")
        .await
        .unwrap();
    assert!(created);
    assert_eq!(account.email, "ada@example.com");
    assert_eq!(account.plan, Plan::Starter);
    assert_eq!(account.status, SubscriptionStatus::Inactive);

    let (again, created) = billing
        .provision_account(&id, "other@example.com", "Other")
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(again.email, "ada@example.com");
}

#[tokio::test]
async fn provision_with_taken_email_conflicts() {
    let (billing, _store) = service();
    billing
        .provision_account(&AccountId::new(), "ada@example.com", "Ada")
        .await
        .unwrap();

    let err = billing
        .provision_account(&AccountId::new(), "ada@example.com", "Imposter")
        .await
        .unwrap_err();
    assert!(matches!(err, BillingError::Conflict(_)));
}

#[tokio::test]
async fn profile_update_and_validation() {
    let (billing, _store) = service();
    let id = AccountId::new();
    billing.provision_account(&id, "ada@example.com", "Ada").await.unwrap();

    let account = billing
        .update_profile(&id, Some("Ada Lovelace".into()), None)
        .await
        .unwrap();
    assert_eq!(account.name, "Ada Lovelace");
    assert_eq!(account.email, "ada@example.com");

    assert!(matches!(
        billing.update_profile(&id, Some("  ".into()), None).await,
        Err(BillingError::InvalidInput(_))
    ));
    assert!(matches!(
        billing.update_profile(&id, None, None).await,
        Err(BillingError::InvalidInput(_))
    ));
    assert!(matches!(
        billing
            .update_profile(&AccountId::new(), Some("Ghost".into()), None)
            .await,
        Err(BillingError::NotFound)
    ));
}

#[tokio::test]
async fn profile_email_conflict() {
    let (billing, _store) = service();
    let ada = AccountId::new();
    billing.provision_account(&ada, "ada@example.com", "Ada").await.unwrap();
    billing
        .provision_account(&AccountId::new(), "bob@example.com", "Bob")
        .await
        .unwrap();

    let err = billing
        .update_profile(&ada, None, Some("bob@example.com".into()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already in use");
}

#[tokio::test]
async fn delete_cascades_to_invoices() {
    let (billing, store) = service();
    let id = seed_account(&store);
    billing
        .update_subscription(&id, request("pro", &["VoiceCraft"]))
        .await
        .unwrap();
    assert_eq!(store.invoice_count(id.0), 1);

    billing.delete_account(&id).await.unwrap();
    assert_eq!(store.invoice_count(id.0), 0);
    assert!(matches!(billing.get_account(&id).await, Err(BillingError::NotFound)));
    assert!(matches!(billing.delete_account(&id).await, Err(BillingError::NotFound)));
}
