pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::{OrderRepository, ProductRepository, Store};
pub use infra::config::Settings;
pub use storage::{ConnectionProvider, MemoryStore, PgStore, StoreError};
pub use transport::http::{create_router, ApiDoc, AppState};
