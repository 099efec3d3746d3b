pub mod manager;
pub mod memory;
pub mod models;
pub mod pg_store;
pub mod store;
pub mod tables;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryStore, MemoryTables};
pub use pg_store::PgContentStore;
pub use store::{ContentStore, StoreError, StoreResult};
