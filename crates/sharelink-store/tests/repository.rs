//! Integration tests for the entry repository against a scripted executor.

use std::sync::Arc;

use sharelink_remote::MockExecutor;
use sharelink_store::EntryRepository;

const DB: &str = "/usr/syno/etc/private/session/sharing/sharing.db";

fn repository_with(mock: Arc<MockExecutor>) -> EntryRepository {
    EntryRepository::new(mock, DB)
}

#[tokio::test]
async fn fetch_all_parses_rows_and_counts_malformed_ones() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect(
        "SELECT rowid, data FROM entry;",
        concat!(
            r#"1|{"private_data":{"name":"Q1","path":"/volume1/Reports/Q1"},"protect_gids":[101,102],"protect_uids":[]}"#,
            "\n",
            "Password: \n",
            r#"2|{"private_data":{"name":"pix","path":"/volume1/photo"},"protect_gids":[],"protect_uids":[1026]}"#,
            "\n",
            "3|{broken json\n",
        ),
    );
    let repository = repository_with(mock.clone());

    let outcome = repository.fetch_all().await.unwrap();

    // Two malformed lines (the prompt and the broken blob) were dropped,
    // never aborting the fetch.
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.records[0].row_id, 1);
    assert_eq!(outcome.records[0].protect_gids, vec![101, 102]);
    assert_eq!(outcome.records[1].row_id, 2);
    assert_eq!(outcome.records[1].protect_uids, vec![1026]);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("sudo -S sqlite3"));
}

#[tokio::test]
async fn fetch_all_propagates_executor_failure() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect_failure("SELECT rowid, data FROM entry;", "database is locked");
    let repository = repository_with(mock);

    let err = repository.fetch_all().await.unwrap_err();
    assert!(err.message.contains("database is locked"));
}

#[tokio::test]
async fn owner_uid_skips_prompt_lines_and_takes_the_last() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect(
        "SELECT owner_uid FROM entry WHERE rowid=7;",
        "Password: \nPassword: \n1026",
    );
    let repository = repository_with(mock);

    assert_eq!(
        repository.fetch_owner_uid(7).await,
        Some("1026".to_string())
    );
}

#[tokio::test]
async fn owner_uid_failure_is_converted_to_none() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect_failure("SELECT owner_uid FROM entry WHERE rowid=9;", "no such table");
    let repository = repository_with(mock);

    assert_eq!(repository.fetch_owner_uid(9).await, None);
}

#[tokio::test]
async fn public_url_is_the_second_pipe_field() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect(
        "SELECT * FROM entry WHERE rowid=7;",
        "Password: \n7|AbCdEf123|{\"private_data\":{}}|1026",
    );
    let repository = repository_with(mock);

    assert_eq!(
        repository.fetch_public_url(7).await,
        Some("AbCdEf123".to_string())
    );
}

#[tokio::test]
async fn empty_public_url_token_is_none() {
    let mock = Arc::new(MockExecutor::new());
    mock.expect("SELECT * FROM entry WHERE rowid=8;", "8||{}|1026");
    let repository = repository_with(mock);

    assert_eq!(repository.fetch_public_url(8).await, None);
}
