//! Integration tests for the compute/patch/verify mutation protocol.

use std::collections::HashSet;
use std::sync::Arc;

use sharelink_entity::{IdentityKind, MutationOutcome, ShareRecord};
use sharelink_remote::MockExecutor;
use sharelink_store::PermissionMutator;

const DB: &str = "/usr/syno/etc/private/session/sharing/sharing.db";

fn record(row_id: i64, gids: Vec<i64>, uids: Vec<i64>) -> ShareRecord {
    ShareRecord {
        row_id,
        name: format!("share-{row_id}"),
        path: format!("/volume1/Reports/share-{row_id}"),
        protect_gids: gids,
        protect_uids: uids,
    }
}

fn mutator_with(mock: Arc<MockExecutor>) -> PermissionMutator {
    PermissionMutator::new(mock, DB)
}

#[tokio::test]
async fn add_appends_and_verifies_per_record() {
    let mock = Arc::new(MockExecutor::new());
    // Record 12: patch then verify.
    mock.expect(
        r#"replace(data, '\"protect_gids\":[101,102]', '\"protect_gids\":[101,102,500]') WHERE rowid=12;"#,
        "",
    );
    mock.expect(
        "SELECT data FROM entry WHERE rowid=12;",
        r#"{"private_data":{"path":"/volume1/Reports/share-12"},"protect_gids":[101,102,500],"protect_uids":[]}"#,
    );
    // Record 15: patch then verify.
    mock.expect(
        r#"replace(data, '\"protect_gids\":[]', '\"protect_gids\":[500]') WHERE rowid=15;"#,
        "",
    );
    mock.expect(
        "SELECT data FROM entry WHERE rowid=15;",
        r#"{"protect_gids":[500],"protect_uids":[]}"#,
    );
    let mutator = mutator_with(mock.clone());

    let records = vec![record(12, vec![101, 102], vec![]), record(15, vec![], vec![])];
    let results = mutator
        .add_identity(&records, IdentityKind::Group, 500)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].row_id, 12);
    assert_eq!(results[0].outcome, MutationOutcome::Applied);
    assert_eq!(results[1].row_id, 15);
    assert_eq!(results[1].outcome, MutationOutcome::Applied);
    // Two UPDATE+verify pairs, nothing else.
    assert_eq!(mock.calls().len(), 4);
    assert_eq!(mock.remaining(), 0);
}

#[tokio::test]
async fn re_adding_a_present_identity_is_a_no_op() {
    let mock = Arc::new(MockExecutor::new());
    let mutator = mutator_with(mock.clone());

    let records = vec![record(12, vec![101, 500], vec![])];
    let results = mutator
        .add_identity(&records, IdentityKind::Group, 500)
        .await;

    assert_eq!(results[0].outcome, MutationOutcome::Skipped);
    // No remote write was issued.
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn removing_an_absent_subset_issues_no_write() {
    let mock = Arc::new(MockExecutor::new());
    let mutator = mutator_with(mock.clone());

    let ids: HashSet<String> = ["999".to_string()].into();
    let records = vec![record(3, vec![7, 8], vec![])];
    let results = mutator
        .remove_identities(&records, IdentityKind::Group, &ids)
        .await;

    assert_eq!(results[0].outcome, MutationOutcome::Skipped);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn removing_a_subset_filters_the_list() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect(
        r#"replace(data, '\"protect_uids\":[3,1026,7]', '\"protect_uids\":[3,7]') WHERE rowid=4;"#,
        "",
    );
    mock.expect(
        "SELECT data FROM entry WHERE rowid=4;",
        r#"{"protect_uids":[3,7]}"#,
    );
    let mutator = mutator_with(mock.clone());

    let ids: HashSet<String> = ["1026".to_string()].into();
    let records = vec![record(4, vec![], vec![3, 1026, 7])];
    let results = mutator
        .remove_identities(&records, IdentityKind::User, &ids)
        .await;

    assert_eq!(results[0].outcome, MutationOutcome::Applied);
}

#[tokio::test]
async fn remove_all_on_an_empty_list_is_a_no_op() {
    let mock = Arc::new(MockExecutor::new());
    let mutator = mutator_with(mock.clone());

    let records = vec![record(5, vec![], vec![])];
    let results = mutator.remove_all(&records, IdentityKind::Group).await;

    assert_eq!(results[0].outcome, MutationOutcome::Skipped);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn remove_all_rewrites_to_the_empty_array() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect(
        r#"replace(data, '\"protect_gids\":[7,8]', '\"protect_gids\":[]') WHERE rowid=6;"#,
        "",
    );
    mock.expect(
        "SELECT data FROM entry WHERE rowid=6;",
        r#"{"protect_gids":[],"protect_uids":[3]}"#,
    );
    let mutator = mutator_with(mock.clone());

    let records = vec![record(6, vec![7, 8], vec![3])];
    let results = mutator.remove_all(&records, IdentityKind::Group).await;

    assert_eq!(results[0].outcome, MutationOutcome::Applied);
}

#[tokio::test]
async fn unverified_patch_is_a_mismatch_warning() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect("UPDATE entry SET data = replace(data,", "");
    // The verify read still shows the old array.
    mock.expect(
        "SELECT data FROM entry WHERE rowid=12;",
        r#"{"protect_gids":[101,102],"protect_uids":[]}"#,
    );
    let mutator = mutator_with(mock.clone());

    let records = vec![record(12, vec![101, 102], vec![])];
    let results = mutator
        .add_identity(&records, IdentityKind::Group, 500)
        .await;

    assert_eq!(results[0].outcome, MutationOutcome::MismatchWarning);
}

#[tokio::test]
async fn a_failed_record_never_blocks_the_rest_of_the_batch() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect_failure("WHERE rowid=1;", "database is locked");
    mock.expect(r#"'\"protect_gids\":[9,500]') WHERE rowid=2;"#, "");
    mock.expect(
        "SELECT data FROM entry WHERE rowid=2;",
        r#"{"protect_gids":[9,500]}"#,
    );
    let mutator = mutator_with(mock.clone());

    let records = vec![record(1, vec![], vec![]), record(2, vec![9], vec![])];
    let results = mutator
        .add_identity(&records, IdentityKind::Group, 500)
        .await;

    assert!(matches!(results[0].outcome, MutationOutcome::Failed(_)));
    assert_eq!(results[1].outcome, MutationOutcome::Applied);
}
