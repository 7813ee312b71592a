//! Document store abstraction.
//!
//! Repositories only need three primitives from the backing database:
//! insert one document, fetch up to `limit` documents from a collection,
//! and list the collection names. [`MongoStore`] talks to MongoDB;
//! [`MemoryStore`] keeps collections in process and backs the test suite
//! and the seed binary's dry runs.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use crate::error::Result;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `document`, returning the identifier the store assigned.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId>;

    /// Returns at most `limit` documents in the store's natural order.
    async fn find(&self, collection: &str, limit: i64) -> Result<Vec<Document>>;

    async fn list_collection_names(&self) -> Result<Vec<String>>;
}
