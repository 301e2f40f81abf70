//! API Gateway to DynamoDB SDK - Types shared by the record handler
//!
//! This crate holds the platform-independent half of the handler: the
//! request/response model, the record and its payload rules, and the storage
//! seam. It has no dependency on the Lambda runtime or the AWS SDK.

pub mod error;
pub mod record;
pub mod request;
pub mod response;
pub mod storage;

pub mod prelude {
    //! Common imports for handler code
    pub use crate::error::HandlerError;
    pub use crate::record::{Record, RecordPayload, DEFAULT_TITLE, DEFAULT_YEAR};
    pub use crate::request::Request;
    pub use crate::response::Response;
    pub use crate::storage::{BoxFuture, MemoryStore, RecordStore, StorageType};
    pub use serde_json::{json, Value as JsonValue};
}

// Re-export key types at crate root
pub use error::HandlerError;
pub use record::Record;
pub use request::Request;
pub use response::Response;
pub use storage::{MemoryStore, RecordStore};
