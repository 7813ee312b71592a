use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{oid::ObjectId, Bson, Document},
    options::{ClientOptions, FindOptions},
    Client, Database,
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, Result},
    store::DocumentStore,
};

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Builds the client pool. The driver connects lazily, so this only
    /// fails on a malformed connection string or unusable options.
    pub async fn connect(url: &str, name: &str, config: &DatabaseConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(url).await?;
        options.max_pool_size = Some(config.max_pool_size);
        options.app_name = Some(config.app_name.clone());

        let client = Client::with_options(options)?;
        Ok(Self::new(client.database(name)))
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document, None)
            .await?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(AppError::Database(format!(
                "Unexpected inserted id in {}: {}",
                collection, other
            ))),
        }
    }

    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<Document>> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(None, options)
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.db.list_collection_names(None).await?)
    }
}
