//! Storage for previously submitted question texts.
//!
//! Submissions are keyed by title; saving a title that already exists
//! replaces the earlier submission. Parsing never touches a store.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Format;

/// Default file used by [`JsonFileStore`] when no path is configured.
pub const DEFAULT_STORE_PATH: &str = "mcq-sessions.json";

/// One submitted question set, as typed or pasted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub title: String,
    pub question_text: String,
    pub answer_text: String,
    pub format: Format,
    pub saved_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(
        title: impl Into<String>,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
        format: Format,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            format,
            saved_at: Utc::now(),
        }
    }
}

/// Key-value storage of submissions, keyed by title.
pub trait SubmissionStore {
    /// Insert or replace the submission with the same title.
    fn save(&mut self, submission: Submission) -> Result<(), StoreError>;

    fn get(&self, title: &str) -> Option<&Submission>;

    /// All submissions, newest first.
    fn list(&self) -> Vec<&Submission>;

    fn remove(&mut self, title: &str) -> Result<Option<Submission>, StoreError>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    submissions: BTreeMap<String, Submission>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl SubmissionStore for MemoryStore {
    fn save(&mut self, submission: Submission) -> Result<(), StoreError> {
        self.submissions.insert(submission.title.clone(), submission);
        Ok(())
    }

    fn get(&self, title: &str) -> Option<&Submission> {
        self.submissions.get(title)
    }

    fn list(&self) -> Vec<&Submission> {
        let mut all: Vec<&Submission> = self.submissions.values().collect();
        all.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        all
    }

    fn remove(&mut self, title: &str) -> Result<Option<Submission>, StoreError> {
        Ok(self.submissions.remove(title))
    }
}

/// Store persisted as a single JSON array, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryStore::new();

        match fs::read_to_string(&path) {
            Ok(content) if !content.trim().is_empty() => {
                let submissions: Vec<Submission> = serde_json::from_str(&content)?;
                for submission in submissions {
                    inner.save(submission)?;
                }
            }
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        debug!(path = %path.display(), count = inner.len(), "opened submission store");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write every submission to a sibling temp file, then rename it over
    /// the store so a failed write leaves the old file intact.
    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.inner.list())?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl SubmissionStore for JsonFileStore {
    fn save(&mut self, submission: Submission) -> Result<(), StoreError> {
        self.inner.save(submission)?;
        self.flush()
    }

    fn get(&self, title: &str) -> Option<&Submission> {
        self.inner.get(title)
    }

    fn list(&self) -> Vec<&Submission> {
        self.inner.list()
    }

    fn remove(&mut self, title: &str) -> Result<Option<Submission>, StoreError> {
        let removed = self.inner.remove(title)?;
        if removed.is_some() {
            self.flush()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn submission(title: &str, minutes_ago: i64) -> Submission {
        let mut submission = Submission::new(title, "1. Q?\nA. x\nAns: A", "", Format::Inline);
        submission.saved_at = Utc::now() - Duration::minutes(minutes_ago);
        submission
    }

    #[test]
    fn save_and_get() {
        let mut store = MemoryStore::new();
        store.save(submission("rust", 0)).unwrap();
        assert_eq!(store.get("rust").unwrap().format, Format::Inline);
        assert!(store.get("go").is_none());
    }

    #[test]
    fn list_is_newest_first() {
        let mut store = MemoryStore::new();
        store.save(submission("old", 30)).unwrap();
        store.save(submission("new", 1)).unwrap();
        store.save(submission("middle", 10)).unwrap();

        let titles: Vec<&str> = store.list().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "middle", "old"]);
    }

    #[test]
    fn saving_same_title_replaces() {
        let mut store = MemoryStore::new();
        store.save(submission("rust", 5)).unwrap();
        let mut replacement = submission("rust", 0);
        replacement.format = Format::Markdown;
        store.save(replacement).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("rust").unwrap().format, Format::Markdown);
    }

    #[test]
    fn remove_submission() {
        let mut store = MemoryStore::new();
        store.save(submission("rust", 0)).unwrap();
        assert!(store.remove("rust").unwrap().is_some());
        assert!(store.remove("rust").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn json_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let saved = submission("rust", 0);
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.save(saved.clone()).unwrap();
            store.save(submission("go", 3)).unwrap();
            store.remove("go").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.get("rust"), Some(&saved));
    }

    #[test]
    fn json_store_flush_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "[]").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        store.save(submission("rust", 0)).unwrap();
        store.save(submission("go", 1)).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("sessions.json")]);

        let saved: Vec<Submission> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Json(_))
        ));
    }
}
