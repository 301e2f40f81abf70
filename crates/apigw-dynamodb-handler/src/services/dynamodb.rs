//! DynamoDB record store

use std::collections::HashMap;

use apigw_dynamodb_sdk::prelude::*;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

/// Partition key of the table
pub const KEY_ATTRIBUTE: &str = "id";

/// A [`RecordStore`] backed by a DynamoDB table.
///
/// The client is built once per process and shared by every invocation.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

impl RecordStore for DynamoStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    fn put<'a>(&'a self, record: &'a Record) -> BoxFuture<'a, Result<(), HandlerError>> {
        Box::pin(async move {
            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(record_to_item(record)))
                .send()
                .await
                .map_err(|e| HandlerError::StorageError(format!("PutItem failed: {}", DisplayErrorContext(&e))))?;

            tracing::debug!(table_name = %self.table_name, item_id = %record.id, "PutItem succeeded");
            Ok(())
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<Record>, HandlerError>> {
        Box::pin(async move {
            let output = self
                .client
                .get_item()
                .table_name(&self.table_name)
                .key(KEY_ATTRIBUTE, AttributeValue::S(id.to_string()))
                .consistent_read(true)
                .send()
                .await
                .map_err(|e| HandlerError::StorageError(format!("GetItem failed: {}", DisplayErrorContext(&e))))?;

            output.item().map(record_from_item).transpose()
        })
    }
}

/// `id` and `title` are strings, `year` is a number.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (KEY_ATTRIBUTE.to_string(), AttributeValue::S(record.id.clone())),
        ("year".to_string(), AttributeValue::N(record.year.to_string())),
        ("title".to_string(), AttributeValue::S(record.title.clone())),
    ])
}

pub fn record_from_item(item: &HashMap<String, AttributeValue>) -> Result<Record, HandlerError> {
    let string_attr = |name: &str| -> Result<String, HandlerError> {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| HandlerError::StorageError(format!("item attribute `{}` is missing or not a string", name)))
    };

    let year = item
        .get("year")
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| HandlerError::StorageError("item attribute `year` is missing or not an integer".into()))?;

    Ok(Record {
        id: string_attr(KEY_ATTRIBUTE)?,
        year,
        title: string_attr("title")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_attribute_types() {
        let item = record_to_item(&Record::new("42", 1999, "Foo"));
        assert_eq!(item.len(), 3);
        assert_eq!(item["id"], AttributeValue::S("42".into()));
        assert_eq!(item["year"], AttributeValue::N("1999".into()));
        assert_eq!(item["title"], AttributeValue::S("Foo".into()));
    }

    #[test]
    fn test_item_back_to_record() {
        let record = Record::new("abc", 2012, "The Amazing Spider-Man 2");
        assert_eq!(record_from_item(&record_to_item(&record)).unwrap(), record);
    }

    #[test]
    fn test_rejects_mistyped_items() {
        let mut item = record_to_item(&Record::new("42", 1999, "Foo"));
        item.insert("year".into(), AttributeValue::S("1999".into()));
        assert!(matches!(record_from_item(&item), Err(HandlerError::StorageError(_))));

        let mut item = record_to_item(&Record::new("42", 1999, "Foo"));
        item.remove("title");
        let err = record_from_item(&item).unwrap_err();
        assert!(err.to_string().contains("`title`"));
    }
}
