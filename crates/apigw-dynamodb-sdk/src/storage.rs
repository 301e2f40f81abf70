//! Storage Backend Abstraction
//!
//! The handler writes through [`RecordStore`], so the same code path runs
//! against DynamoDB in production and against [`MemoryStore`] locally and in
//! tests.

use std::future::Future;
use std::pin::Pin;

use dashmap::DashMap;

use crate::error::HandlerError;
use crate::record::Record;

/// Type alias for boxed future returned by stores
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// Managed DynamoDB table
    DynamoDb,
    /// Process-local map, lost when the process exits
    Memory,
}

impl std::str::FromStr for StorageType {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dynamodb" => Ok(StorageType::DynamoDb),
            "memory" => Ok(StorageType::Memory),
            other => Err(HandlerError::Internal(format!(
                "unknown storage type {:?}, expected \"dynamodb\" or \"memory\"",
                other
            ))),
        }
    }
}

/// A table of records keyed by `id`
pub trait RecordStore: Send + Sync {
    /// Name of the table records are written to
    fn table_name(&self) -> &str;

    /// Insert the record, replacing any existing record with the same id
    fn put<'a>(&'a self, record: &'a Record) -> BoxFuture<'a, Result<(), HandlerError>>;

    /// Read a record back by id
    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Record>, HandlerError>>;
}

/// In-memory record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    table_name: String,
    records: DashMap<String, Record>,
}

impl MemoryStore {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            records: DashMap::new(),
        }
    }

    /// Number of distinct ids stored
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every stored record, in no particular order
    pub fn records(&self) -> Vec<Record> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }
}

impl RecordStore for MemoryStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn put<'a>(&'a self, record: &'a Record) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            self.records.insert(record.id.clone(), record.clone());
            Ok(())
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Record>, HandlerError>> {
        Box::pin(async move { Ok(self.records.get(id).map(|entry| entry.value().clone())) })
    }
}
