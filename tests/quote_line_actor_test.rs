use actor_framework::mock::MockClient;
use actor_framework::ActorClient;
use quote_merger::clients::{LineGroupClient, QuoteClient};
use quote_merger::model::{GroupId, Quote, QuoteId, QuoteLineCreate, QuoteLineGroup, QuoteLineUpdate};
use quote_merger::quote_line_actor::{OrgRules, QuoteLineContext, QuoteLineError};
use serde_json::json;
use std::sync::Arc;

fn group(id: u32, quote: u32) -> QuoteLineGroup {
    QuoteLineGroup {
        id: GroupId(id),
        quote: QuoteId(quote),
        name: "Station 1".to_string(),
        description: None,
    }
}

/// Real QuoteLine actor with mocked Quote and QuoteLineGroup clients.
/// This tests the server-side validation in `QuoteLine::on_create` without the other actors.
#[tokio::test]
async fn test_quote_line_actor_with_mocked_dependencies() {
    let mut quote_mock = MockClient::<Quote>::new();
    let mut group_mock = MockClient::<QuoteLineGroup>::new();

    // QuoteLine::on_create looks up the quote, then the group
    quote_mock
        .expect_get(QuoteId(1))
        .return_ok(Some(Quote::new(QuoteId(1), "Target", None, true)));
    group_mock.expect_get(GroupId(4)).return_ok(Some(group(4, 1)));

    let (line_actor, line_client) = quote_merger::quote_line_actor::new();
    let actor_handle = tokio::spawn(line_actor.run(QuoteLineContext {
        quotes: QuoteClient::new(quote_mock.client()),
        groups: LineGroupClient::new(group_mock.client()),
        rules: Arc::new(OrgRules::default()),
    }));

    let line_id = line_client
        .create_line(
            QuoteLineCreate::on_quote(QuoteId(1))
                .in_group(GroupId(4))
                .quantity(json!(6))
                .field("SBQQ__Product__c", json!("01t1")),
        )
        .await
        .expect("Line creation failed");

    let line = line_client
        .get(line_id)
        .await
        .unwrap()
        .expect("Line not found");
    assert_eq!(line.quote, QuoteId(1));
    assert_eq!(line.group, Some(GroupId(4)));
    assert_eq!(line.quantity, Some(json!(6)));

    quote_mock.verify();
    group_mock.verify();

    drop(line_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_group_on_another_quote_is_rejected() {
    let mut quote_mock = MockClient::<Quote>::new();
    let mut group_mock = MockClient::<QuoteLineGroup>::new();
    quote_mock
        .expect_get(QuoteId(1))
        .return_ok(Some(Quote::new(QuoteId(1), "Target", None, true)));
    group_mock.expect_get(GroupId(4)).return_ok(Some(group(4, 2)));

    let (line_actor, line_client) = quote_merger::quote_line_actor::new();
    let actor_handle = tokio::spawn(line_actor.run(QuoteLineContext {
        quotes: QuoteClient::new(quote_mock.client()),
        groups: LineGroupClient::new(group_mock.client()),
        rules: Arc::new(OrgRules::permissive()),
    }));

    let err = line_client
        .create_line(QuoteLineCreate::on_quote(QuoteId(1)).in_group(GroupId(4)))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        QuoteLineError::GroupOnOtherQuote {
            group: "group_4".into(),
            group_quote: "quote_2".into(),
            quote: "quote_1".into(),
        }
    );
    assert!(line_client.list().await.unwrap().is_empty());

    drop(line_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_field_limit_is_enforced_after_reference_checks() {
    let mut quote_mock = MockClient::<Quote>::new();
    let group_mock = MockClient::<QuoteLineGroup>::new();
    quote_mock
        .expect_get(QuoteId(1))
        .return_ok(Some(Quote::new(QuoteId(1), "Target", None, true)));

    let mut rules = OrgRules::permissive();
    rules.field_limits.insert("SAP_Configuration__c".into(), 3);

    let (line_actor, line_client) = quote_merger::quote_line_actor::new();
    let actor_handle = tokio::spawn(line_actor.run(QuoteLineContext {
        quotes: QuoteClient::new(quote_mock.client()),
        groups: LineGroupClient::new(group_mock.client()),
        rules: Arc::new(rules),
    }));

    let err = line_client
        .create_line(QuoteLineCreate::on_quote(QuoteId(1)).field("SAP_Configuration__c", json!("abcd")))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        QuoteLineError::FieldTooLong {
            field: "SAP_Configuration__c".into(),
            len: 4,
            limit: 3,
        }
    );
    quote_mock.verify();

    drop(line_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_updates_are_checked_against_org_rules() {
    let mut quote_mock = MockClient::<Quote>::new();
    let group_mock = MockClient::<QuoteLineGroup>::new();
    quote_mock
        .expect_get(QuoteId(1))
        .return_ok(Some(Quote::new(QuoteId(1), "Target", None, true)));

    let (line_actor, line_client) = quote_merger::quote_line_actor::new();
    let actor_handle = tokio::spawn(line_actor.run(QuoteLineContext {
        quotes: QuoteClient::new(quote_mock.client()),
        groups: LineGroupClient::new(group_mock.client()),
        rules: Arc::new(OrgRules::default()),
    }));

    let line_id = line_client
        .create_line(QuoteLineCreate::on_quote(QuoteId(1)).field("SBQQ__Product__c", json!("01t1")))
        .await
        .unwrap();

    // Removing a required field is refused and leaves the line as it was
    let removal = QuoteLineUpdate {
        quantity: Some(json!(4)),
        fields: vec![("SBQQ__Product__c".to_string(), None)],
    };
    let result = line_client.inner().update(line_id, removal).await;
    assert!(result.is_err());

    let line = line_client.get(line_id).await.unwrap().unwrap();
    assert_eq!(line.fields["SBQQ__Product__c"], json!("01t1"));
    assert_eq!(line.quantity, None);

    drop(line_client);
    actor_handle.await.unwrap();
}
