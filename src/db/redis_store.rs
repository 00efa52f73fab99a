use redis::AsyncCommands;
use redis::Client;

use crate::error::AppResult;

use super::storage::{Storage, StorageKey};

/// Redis-backed storage; every key is prefixed with a namespace so several
/// deployments can share one server
#[derive(Clone)]
pub struct RedisStorage {
    client: Client,
    namespace: String,
}

impl RedisStorage {
    /// Creates the client. No connection is made until the first command.
    pub fn open(redis_url: &str, namespace: &str) -> anyhow::Result<Self> {
        let client = Client::open(redis_url)?;
        Ok(Self::new(client, namespace))
    }

    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            client,
            namespace: namespace.to_string(),
        }
    }

    fn redis_key(&self, key: StorageKey) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait::async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: StorageKey) -> AppResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(self.redis_key(key)).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis get failed");
            e
        })?;
        Ok(value)
    }

    async fn set(&self, key: StorageKey, value: String) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(self.redis_key(key), value).await.map_err(|e| {
            tracing::warn!(error = %e, "Redis set failed");
            e
        })?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
