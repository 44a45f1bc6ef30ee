//! JSONL persistence for in-memory storage.
//!
//! Each line of the data file is one tagged record:
//!
//! ```text
//! {"kind":"user","id":1,"name":"Ada"}
//! {"kind":"connection","a":1,"b":2}
//! ```
//!
//! Users are always loaded before connections, so line order in the file
//! does not matter.

use super::inner::InMemoryStoreInner;
use super::wrap;
use crate::domain::{Connection, User, UserId};
use crate::error::{Error, Result};
use crate::storage::GraphStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

/// One line of the data file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    User(User),
    Connection(Connection),
}

/// Warnings that can occur during JSONL file loading.
///
/// These are non-fatal: the offending line or edge is skipped and loading
/// continues. Applications should log or report them, since they indicate
/// data that was hand-edited or partially written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Malformed JSON line that couldn't be parsed.
    ///
    /// **Effect**: Line is skipped entirely.
    MalformedJson {
        /// The 1-based line number of the bad line.
        line_number: usize,
        /// The parser's description of the problem.
        error: String,
    },

    /// A second user record reused an existing ID.
    ///
    /// **Effect**: The later record is skipped; the first one wins.
    DuplicateUser {
        /// The reused ID.
        id: UserId,
        /// The 1-based line number of the skipped record.
        line_number: usize,
    },

    /// A connection record names a user that doesn't exist in the file.
    ///
    /// **Effect**: The edge is skipped.
    OrphanedConnection {
        /// Lower endpoint.
        a: UserId,
        /// Higher endpoint.
        b: UserId,
    },

    /// A connection record joins a user to themselves.
    ///
    /// **Effect**: The edge is skipped.
    SelfConnection {
        /// The user named on both ends.
        id: UserId,
    },

    /// The same unordered pair appears more than once.
    ///
    /// **Effect**: Only the first occurrence creates an edge.
    DuplicateConnection {
        /// Lower endpoint.
        a: UserId,
        /// Higher endpoint.
        b: UserId,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "line {line_number}: malformed JSON: {error}")
            }
            Self::DuplicateUser { id, line_number } => {
                write!(f, "line {line_number}: duplicate user {id}")
            }
            Self::OrphanedConnection { a, b } => {
                write!(f, "connection {a} <-> {b} references an unknown user")
            }
            Self::SelfConnection { id } => write!(f, "user {id} is connected to themselves"),
            Self::DuplicateConnection { a, b } => {
                write!(f, "connection {a} <-> {b} appears more than once")
            }
        }
    }
}

/// Load storage from a JSONL file.
///
/// # Error Handling
///
/// Malformed lines and inconsistent records are skipped and reported as
/// [`LoadWarning`]s. Only I/O failures are returned as errors.
///
/// # Returns
///
/// Returns a tuple of `(store, warnings)`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read.
pub async fn load_from_jsonl(path: &Path) -> Result<(Arc<dyn GraphStore>, Vec<LoadWarning>)> {
    let (inner, warnings) = load_inner(path).await?;
    Ok((Arc::new(wrap(inner)), warnings))
}

pub(crate) async fn load_inner(path: &Path) -> Result<(InMemoryStoreInner, Vec<LoadWarning>)> {
    let file = File::open(path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut warnings = Vec::new();
    let mut users = Vec::new();
    let mut connections = Vec::new();

    // First pass: parse every line, tolerating garbage
    let mut line_number = 0;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Record>(&line) {
            Ok(Record::User(user)) => users.push((line_number, user)),
            Ok(Record::Connection(conn)) => connections.push(conn),
            Err(e) => warnings.push(LoadWarning::MalformedJson {
                line_number,
                error: e.to_string(),
            }),
        }
    }

    let mut inner = InMemoryStoreInner::new();

    // Second pass: users
    for (line_number, user) in users {
        let id = user.id;
        if inner.add_user(user).is_err() {
            warnings.push(LoadWarning::DuplicateUser { id, line_number });
        }
    }

    // Third pass: connections. Endpoints are re-normalized because the file
    // may have been edited by hand.
    for raw in connections {
        let Some(conn) = Connection::new(raw.a, raw.b) else {
            warnings.push(LoadWarning::SelfConnection { id: raw.a });
            continue;
        };
        match inner.insert_edge(conn.a, conn.b) {
            Ok(true) => {}
            Ok(false) => warnings.push(LoadWarning::DuplicateConnection {
                a: conn.a,
                b: conn.b,
            }),
            Err(_) => warnings.push(LoadWarning::OrphanedConnection {
                a: conn.a,
                b: conn.b,
            }),
        }
    }

    tracing::debug!(
        path = %path.display(),
        users = inner.users.len(),
        connections = inner.graph.edge_count(),
        warnings = warnings.len(),
        "Loaded graph from JSONL"
    );

    Ok((inner, warnings))
}

/// Save a store's contents to a JSONL file.
///
/// The file is written atomically: records go to `<path>.tmp` first, which
/// is then renamed over `path`. On failure the original file is untouched.
///
/// # Errors
///
/// Returns an error if the store cannot be exported, or if writing or
/// renaming the file fails.
pub async fn save_to_jsonl(store: &dyn GraphStore, path: &Path) -> Result<()> {
    let users = store.export_users().await?;
    let connections = store.export_connections().await?;

    let records = users
        .into_iter()
        .map(Record::User)
        .chain(connections.into_iter().map(Record::Connection));

    let temp_path = make_temp_path(path);
    if let Err(e) = write_records(&temp_path, records).await {
        // Best-effort cleanup of temp file
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

async fn write_records(temp_path: &Path, records: impl Iterator<Item = Record>) -> Result<()> {
    let file = File::create(temp_path).await?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let mut line = serde_json::to_vec(&record).map_err(Error::Json)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
    }

    writer.flush().await?;
    Ok(())
}

/// Appends `.tmp` to the file name (`graph.jsonl` becomes `graph.jsonl.tmp`).
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn make_temp_path_with_extension() {
        let temp = make_temp_path(Path::new("/data/graph.jsonl"));
        assert_eq!(temp, Path::new("/data/graph.jsonl.tmp"));
    }

    #[test]
    fn make_temp_path_without_extension() {
        let temp = make_temp_path(Path::new("/data/graph"));
        assert_eq!(temp, Path::new("/data/graph.tmp"));
    }

    #[test]
    fn record_format_is_tagged() {
        let user = serde_json::to_string(&Record::User(User::new(1, "Ada"))).unwrap();
        assert_eq!(user, r#"{"kind":"user","id":1,"name":"Ada"}"#);

        let conn = Connection::new(UserId(2), UserId(1)).unwrap();
        let line = serde_json::to_string(&Record::Connection(conn)).unwrap();
        assert_eq!(line, r#"{"kind":"connection","a":1,"b":2}"#);
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.jsonl");

        let store: Arc<dyn GraphStore> = Arc::new(wrap(InMemoryStoreInner::new()));
        store.add_user(User::new(1, "Ada")).await.unwrap();
        save_to_jsonl(store.as_ref(), &path).await.unwrap();

        assert!(path.exists());
        assert!(!make_temp_path(&path).exists());
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(content, "{\"kind\":\"user\",\"id\":1,\"name\":\"Ada\"}\n");
    }

    #[tokio::test]
    async fn load_collects_warnings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph.jsonl");
        let content = [
            r#"{"kind":"connection","a":2,"b":1}"#,
            r#"{"kind":"user","id":1,"name":"Ada"}"#,
            r#"not json"#,
            "",
            r#"{"kind":"user","id":2,"name":"Grace"}"#,
            r#"{"kind":"user","id":2,"name":"Imposter"}"#,
            r#"{"kind":"connection","a":1,"b":2}"#,
            r#"{"kind":"connection","a":1,"b":9}"#,
            r#"{"kind":"connection","a":2,"b":2}"#,
        ]
        .join("\n");
        tokio::fs::write(&path, content).await.unwrap();

        let (inner, warnings) = load_inner(&path).await.unwrap();

        assert_eq!(inner.users.len(), 2);
        assert_eq!(inner.users[&UserId(2)].name, "Grace");
        assert_eq!(inner.graph.edge_count(), 1);
        assert_eq!(
            warnings,
            vec![
                LoadWarning::MalformedJson {
                    line_number: 3,
                    error: warnings_error(&warnings),
                },
                LoadWarning::DuplicateUser {
                    id: UserId(2),
                    line_number: 6,
                },
                LoadWarning::DuplicateConnection {
                    a: UserId(1),
                    b: UserId(2),
                },
                LoadWarning::OrphanedConnection {
                    a: UserId(1),
                    b: UserId(9),
                },
                LoadWarning::SelfConnection { id: UserId(2) },
            ]
        );
    }

    fn warnings_error(warnings: &[LoadWarning]) -> String {
        match &warnings[0] {
            LoadWarning::MalformedJson { error, .. } => error.clone(),
            other => panic!("expected malformed JSON warning, got {other:?}"),
        }
    }
}
