use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CoreError;

/// Data-access capability handed to the journal instead of any ambient,
/// globally-discovered connection. The core only ever calls `fetch_all`;
/// `insert` and `delete` exist so the same capability covers the journal
/// entry form, which is wired up outside this crate.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Human-readable store name, for logs.
    fn store_name(&self) -> &str;

    /// Fetch every raw record. Implementations surface backend errors as
    /// `CoreError::FetchFailed` with the backend message verbatim.
    async fn fetch_all(&self) -> Result<Vec<Value>, CoreError>;

    async fn insert(&self, record: Value) -> Result<(), CoreError>;

    async fn delete(&self, id: &str) -> Result<(), CoreError>;
}

/// Simple Mutex-guarded store, useful for tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<Value>>,
}

impl InMemoryStore {
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl TradeStore for InMemoryStore {
    fn store_name(&self) -> &str {
        "in-memory"
    }

    async fn fetch_all(&self) -> Result<Vec<Value>, CoreError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| CoreError::FetchFailed(e.to_string()))?
            .clone())
    }

    async fn insert(&self, record: Value) -> Result<(), CoreError> {
        self.records
            .lock()
            .map_err(|e| CoreError::FetchFailed(e.to_string()))?
            .push(record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| CoreError::FetchFailed(e.to_string()))?;
        records.retain(|r| match r.get("id") {
            Some(Value::String(s)) => s != id,
            Some(other) => other.to_string() != id,
            None => true,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_in_memory_store_round_trip() {
        let store = InMemoryStore::default();
        store.insert(json!({"id": "a", "result": "win"})).await.unwrap();
        store.insert(json!({"id": "b", "result": "loss"})).await.unwrap();
        assert_eq!(store.fetch_all().await.unwrap().len(), 2);

        store.delete("a").await.unwrap();
        let remaining = store.fetch_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0]["id"], json!("b"));
    }
}
