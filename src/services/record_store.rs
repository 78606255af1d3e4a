//! src/services/record_store.rs
//!
//! Storage port for the APOD collection. The whole collection is the unit of
//! storage: every call reads or rewrites the complete document, with no
//! caching and no locking between a load and the following save.

use crate::models::record::Record;
use async_trait::async_trait;
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("`{path}` does not hold a valid record collection: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize record collection: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when the failure happened while loading rather than persisting.
    pub fn is_read(&self) -> bool {
        matches!(self, StoreError::Read { .. } | StoreError::Decode { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Full-collection persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read and decode the entire collection.
    async fn load_all(&self) -> StoreResult<Vec<Record>>;

    /// Serialize and overwrite the entire collection.
    async fn save_all(&self, records: &[Record]) -> StoreResult<()>;
}

/// Collection stored as one pretty-printed JSON array on local disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Create the document as an empty array if it does not exist yet.
    ///
    /// Returns `true` when a new document was written. An existing file is
    /// never touched, whatever its content.
    pub async fn ensure_initialized(&self) -> StoreResult<bool> {
        match fs::metadata(&self.path).await {
            Ok(_) => return Ok(false),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.display_path(),
                    source,
                });
            }
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        self.save_all(&[]).await?;
        Ok(true)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_all(&self) -> StoreResult<Vec<Record>> {
        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read {
                path: self.display_path(),
                source,
            })?;

        let records: Vec<Record> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                path: self.display_path(),
                source,
            })?;

        debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn save_all(&self, records: &[Record]) -> StoreResult<()> {
        let body = serde_json::to_string_pretty(records).map_err(StoreError::Encode)?;

        fs::write(&self.path, body)
            .await
            .map_err(|source| StoreError::Write {
                path: self.display_path(),
                source,
            })?;

        debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemoryStore;


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn records(value: serde_json::Value) -> Vec<Record> {
        serde_json::from_value(value).expect("records json")
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.is_read());
    }

    #[tokio::test]
    async fn malformed_content_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn non_array_document_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        std::fs::write(&path, r#"{"date": "2024-01-01"}"#).unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn save_overwrites_and_load_keeps_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        std::fs::write(&path, r#"[{"date": "old"}]"#).unwrap();
        let store = JsonFileStore::new(&path);

        let data = records(json!([
            {"date": "2024-01-02", "title": "B"},
            {"date": "2024-01-01", "title": "A", "liked": true}
        ]));
        store.save_all(&data).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), data);
    }

    #[tokio::test]
    async fn writes_two_space_indented_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        let store = JsonFileStore::new(&path);

        store
            .save_all(&records(json!([{"date": "2024-01-01"}])))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  {\n    \"date\": \"2024-01-01\"\n  }\n]");
    }

    #[tokio::test]
    async fn saved_file_keeps_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        let store = JsonFileStore::new(&path);

        store
            .save_all(&records(json!([{"title": "T", "url": "u", "date": "2024-01-01"}])))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[\n  {\n    \"title\": \"T\",\n    \"url\": \"u\",\n    \"date\": \"2024-01-01\"\n  }\n]"
        );
        let reloaded = serde_json::to_string(&store.load_all().await.unwrap()).unwrap();
        assert_eq!(reloaded, r#"[{"title":"T","url":"u","date":"2024-01-01"}]"#);
    }

    #[tokio::test]
    async fn non_object_element_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apod.json");
        std::fs::write(&path, r#"[1, {"date": "2024-01-01"}]"#).unwrap();

        let err = JsonFileStore::new(&path).load_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope").join("apod.json"));

        let err = store.save_all(&[]).await.unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert!(!err.is_read());
    }

    #[tokio::test]
    async fn ensure_initialized_creates_empty_collection_once() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("data").join("apod.json"));

        assert!(store.ensure_initialized().await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());

        store
            .save_all(&records(json!([{"date": "keep"}])))
            .await
            .unwrap();
        assert!(!store.ensure_initialized().await.unwrap());
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }
}
