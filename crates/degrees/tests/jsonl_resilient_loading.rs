//! Loading hand-edited or partially written JSONL graph files.

use degrees::domain::{Connection, User, UserId};
use degrees::storage::in_memory::{LoadWarning, load_from_jsonl};
use degrees::storage::{StorageBackend, create_store};
use std::path::PathBuf;
use tempfile::TempDir;

async fn write_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("graph.jsonl");
    tokio::fs::write(&path, content).await.unwrap();
    path
}

#[tokio::test]
async fn connections_may_precede_users() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        concat!(
            r#"{"kind":"connection","a":2,"b":1}"#, "\n",
            r#"{"kind":"user","id":1,"name":"Ada"}"#, "\n",
            r#"{"kind":"user","id":2,"name":"Grace"}"#, "\n",
        ),
    )
    .await;

    let (store, warnings) = load_from_jsonl(&path).await.unwrap();

    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(
        store.export_connections().await.unwrap(),
        vec![Connection::new(UserId(1), UserId(2)).unwrap()]
    );
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "\n   \n{\"kind\":\"user\",\"id\":1,\"name\":\"Ada\"}\n\n").await;

    let (store, warnings) = load_from_jsonl(&path).await.unwrap();

    assert!(warnings.is_empty());
    assert_eq!(store.export_users().await.unwrap(), vec![User::new(1, "Ada")]);
}

#[tokio::test]
async fn bad_records_are_skipped_with_warnings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        concat!(
            r#"{"kind":"user","id":1,"name":"Ada"}"#, "\n",
            r#"{"kind":"user","id":2,"name":"Grace"}"#, "\n",
            "{not json\n",
            r#"{"kind":"user","id":1,"name":"Impostor"}"#, "\n",
            r#"{"kind":"connection","a":1,"b":2}"#, "\n",
            r#"{"kind":"connection","a":2,"b":1}"#, "\n",
            r#"{"kind":"connection","a":1,"b":7}"#, "\n",
            r#"{"kind":"connection","a":2,"b":2}"#, "\n",
            r#"{"kind":"group","id":5}"#, "\n",
        ),
    )
    .await;

    let (store, warnings) = load_from_jsonl(&path).await.unwrap();

    assert_eq!(warnings.len(), 6, "warnings: {warnings:?}");
    assert!(matches!(warnings[0], LoadWarning::MalformedJson { line_number: 3, .. }));
    assert!(matches!(warnings[1], LoadWarning::MalformedJson { line_number: 9, .. }));
    assert_eq!(
        warnings[2],
        LoadWarning::DuplicateUser { id: UserId(1), line_number: 4 }
    );
    assert_eq!(
        warnings[3],
        LoadWarning::DuplicateConnection { a: UserId(1), b: UserId(2) }
    );
    assert_eq!(
        warnings[4],
        LoadWarning::OrphanedConnection { a: UserId(1), b: UserId(7) }
    );
    assert_eq!(warnings[5], LoadWarning::SelfConnection { id: UserId(2) });

    // First record wins for a duplicated user
    assert_eq!(store.find_user(UserId(1)).await.unwrap(), Some(User::new(1, "Ada")));
    assert_eq!(store.export_connections().await.unwrap().len(), 1);
}

#[test]
fn warnings_render_with_location() {
    let warning = LoadWarning::DuplicateUser { id: UserId(3), line_number: 12 };
    assert_eq!(warning.to_string(), "line 12: duplicate user #3");
}

#[tokio::test]
async fn backend_opens_file_with_warnings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        concat!(
            r#"{"kind":"user","id":1,"name":"Ada"}"#, "\n",
            "garbage\n",
            r#"{"kind":"user","id":2,"name":"Grace"}"#, "\n",
            r#"{"kind":"connection","a":1,"b":2}"#, "\n",
        ),
    )
    .await;

    let store = create_store(StorageBackend::Jsonl(path)).await.unwrap();

    assert_eq!(store.export_users().await.unwrap().len(), 2);
    assert_eq!(
        store.immediate_connections(UserId(1)).await.unwrap(),
        vec![User::new(2, "Grace")]
    );
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = load_from_jsonl(&dir.path().join("absent.jsonl")).await;
    assert!(result.is_err());
}
