/// single JSON document on disk
pub mod file_storage;
pub use file_storage::FileStorage;

/// https://www.mongodb.com collection, one document per user
pub mod mongo_storage;
pub use mongo_storage::MongoStorage;
