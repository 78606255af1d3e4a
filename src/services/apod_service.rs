//! src/services/apod_service.rs
//!
//! ApodService — the collection operations behind the `/apod` routes. Each
//! call loads the full collection, computes its result, and (for mutations)
//! saves the full collection back. Concurrent mutations are last-write-wins.

use crate::{
    models::record::Record,
    services::record_store::{RecordStore, StoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ApodError {
    #[error("no record with date `{0}`")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApodResult<T> = Result<T, ApodError>;

#[derive(Clone)]
pub struct ApodService {
    store: Arc<dyn RecordStore>,
}

impl ApodService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The full collection in stored order.
    pub async fn list_all(&self) -> ApodResult<Vec<Record>> {
        Ok(self.store.load_all().await?)
    }

    /// First record whose `date` matches.
    pub async fn get_by_date(&self, date: &str) -> ApodResult<Record> {
        let records = self.store.load_all().await?;
        records
            .into_iter()
            .find(|r| r.date() == Some(date))
            .ok_or_else(|| ApodError::NotFound(date.to_string()))
    }

    /// Records whose `liked` is strictly `true`.
    pub async fn list_liked(&self) -> ApodResult<Vec<Record>> {
        let records = self.store.load_all().await?;
        Ok(records.into_iter().filter(Record::is_liked).collect())
    }

    /// Append `record` as given. Duplicate dates are not checked.
    pub async fn create(&self, record: Record) -> ApodResult<Record> {
        let mut records = self.store.load_all().await?;
        records.push(record.clone());
        self.store.save_all(&records).await?;

        debug!("appended record {:?}, collection size {}", record.date(), records.len());
        Ok(record)
    }

    /// Shallow-merge `patch` over the first record matching `date`.
    ///
    /// The patch may carry its own `date`, which replaces the key.
    pub async fn update_by_date(&self, date: &str, patch: Record) -> ApodResult<Record> {
        self.mutate(date, |record| record.merge(patch)).await
    }

    /// Remove the first record matching `date` and return it.
    pub async fn delete_by_date(&self, date: &str) -> ApodResult<Record> {
        let mut records = self.store.load_all().await?;
        let index = position_of(&records, date)?;
        let removed = records.remove(index);
        self.store.save_all(&records).await?;

        debug!("deleted record {} at index {}", date, index);
        Ok(removed)
    }

    /// Flip `liked` by truthiness. A missing flag counts as false and becomes true.
    pub async fn toggle_like(&self, date: &str) -> ApodResult<Record> {
        self.mutate(date, |record| {
            let liked = record.liked_truthy();
            record.set_liked(!liked);
        })
        .await
    }

    /// Set `liked` to false regardless of its current value.
    pub async fn unlike(&self, date: &str) -> ApodResult<Record> {
        self.mutate(date, |record| record.set_liked(false)).await
    }

    async fn mutate<F>(&self, date: &str, apply: F) -> ApodResult<Record>
    where
        F: FnOnce(&mut Record),
    {
        let mut records = self.store.load_all().await?;
        let index = position_of(&records, date)?;
        apply(&mut records[index]);
        self.store.save_all(&records).await?;

        debug!("updated record {} at index {}", date, index);
        Ok(records.swap_remove(index))
    }
}

fn position_of(records: &[Record], date: &str) -> ApodResult<usize> {
    records
        .iter()
        .position(|r| r.date() == Some(date))
        .ok_or_else(|| ApodError::NotFound(date.to_string()))
}
