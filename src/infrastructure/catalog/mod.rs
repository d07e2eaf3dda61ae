//! Catalog adapters
//!
//! - `CkanClient` - the action API over blocking HTTP
//! - `MemoryCatalog` - in-process catalog for tests and dry runs

mod envelope;
mod http;
mod memory;

pub use envelope::ApiResponse;
pub use http::{CkanClient, DOWNLOAD_CHUNK_SIZE};
pub use memory::MemoryCatalog;
