//! Record store backends
//!
//! - DynamoDB - the managed table used in production
//! - Memory - process-local map for local runs

pub mod dynamodb;

pub use dynamodb::DynamoStore;

use apigw_dynamodb_sdk::prelude::*;
use aws_config::BehaviorVersion;

use crate::config::AppConfig;

/// Build the store selected by the configuration.
///
/// Called once at cold start; the returned store lives for the whole process.
pub async fn connect(config: &AppConfig) -> Box<dyn RecordStore> {
    match config.storage {
        StorageType::DynamoDb => {
            let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
            tracing::info!(
                table_name = %config.table_name,
                region = ?sdk_config.region(),
                "Using DynamoDB record store"
            );
            Box::new(DynamoStore::new(aws_sdk_dynamodb::Client::new(&sdk_config), &config.table_name))
        }
        StorageType::Memory => {
            tracing::warn!(table_name = %config.table_name, "Using in-memory record store, records are not persisted");
            Box::new(MemoryStore::new(&config.table_name))
        }
    }
}
