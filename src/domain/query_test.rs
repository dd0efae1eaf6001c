use super::*;
use crate::domain::models::webhook::{webhook_fields, Webhook, WebhookEventType};

fn webhook(id: &str, org: &str, project: Option<&str>) -> Webhook {
    let mut webhook = Webhook::new(
        org,
        project.map(str::to_string),
        "http://x",
        &[WebhookEventType::NewError],
    );
    webhook.id = id.to_string();
    webhook
}

#[test]
fn test_and_flattens_and_absorbs_all() {
    let filter = Filter::All
        .and(Filter::term("a", "1"))
        .and(Filter::term("b", "2"))
        .and(Filter::All);

    assert_eq!(
        filter,
        Filter::And(vec![Filter::term("a", "1"), Filter::term("b", "2")])
    );
    assert_eq!(Filter::All.and(Filter::All), Filter::All);
}

#[test]
fn test_or_with_all_matches_everything() {
    assert_eq!(Filter::term("a", "1").or(Filter::All), Filter::All);

    let filter = Filter::term("a", "1")
        .or(Filter::term("b", "2"))
        .or(Filter::missing("c"));
    assert_eq!(filter.fields(), vec!["a", "b", "c"]);
}

#[test]
fn test_matches_term_and_missing() {
    let org_wide = webhook("1", "org1", None);
    let scoped = webhook("2", "org1", Some("p1"));

    let term = Filter::term(webhook_fields::PROJECT_ID, "p1");
    assert!(!term.matches(&org_wide));
    assert!(term.matches(&scoped));

    let missing = Filter::missing(webhook_fields::PROJECT_ID);
    assert!(missing.matches(&org_wide));
    assert!(!missing.matches(&scoped));
}

#[test]
fn test_validate_fields_rejects_unknown_field() {
    let known = Filter::term(webhook_fields::URL, "http://x")
        .and(Filter::missing(webhook_fields::PROJECT_ID));
    assert!(known.validate_fields::<Webhook>().is_ok());

    let unknown = known.or(Filter::term("team_id", "t1"));
    match unknown.validate_fields::<Webhook>() {
        Err(RepositoryError::Query(message)) => assert!(message.contains("team_id")),
        other => panic!("expected query error, got {:?}", other),
    }
}

#[test]
fn test_descriptor_builder() {
    let query = QueryDescriptor::new()
        .with_field_equals(webhook_fields::URL, "http://x")
        .with_cache_key("org:a-project:*")
        .with_expires_in(Duration::from_secs(300));

    assert_eq!(query.filter(), &Filter::term(webhook_fields::URL, "http://x"));
    assert_eq!(query.cache_key(), Some("org:a-project:*"));
    assert_eq!(query.expires_in(), Some(Duration::from_secs(300)));
    assert_eq!(query.paging(), None);
}

#[test]
fn test_find_results_paging() {
    let all = FindResults::from_matches(vec![1, 2, 3, 4, 5], None);
    assert_eq!(all.total, 5);
    assert_eq!(all.len(), 5);
    assert!(!all.has_more);

    let first = FindResults::from_matches(vec![1, 2, 3, 4, 5], Some(Paging::new(1, 2)));
    assert_eq!(first.documents, vec![1, 2]);
    assert_eq!(first.total, 5);
    assert!(first.has_more);

    let last = FindResults::from_matches(vec![1, 2, 3, 4, 5], Some(Paging::new(3, 2)));
    assert_eq!(last.documents, vec![5]);
    assert!(!last.has_more);

    // 页码0按第1页处理
    assert_eq!(Paging::new(0, 10).offset(), 0);
}
