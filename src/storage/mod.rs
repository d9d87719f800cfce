pub mod connection;
pub mod error;
pub mod memory;
pub mod postgres;

pub use connection::ConnectionProvider;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
