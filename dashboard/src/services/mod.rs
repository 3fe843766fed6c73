//! Service implementations
//!
//! Real implementations of the service traits and the stateful services
//! built on the core modules

pub mod contract_service;
pub mod data_source;
pub mod upload_queue;

#[cfg(test)]
pub mod tests;

// Re-export service implementations
pub use contract_service::ContractService;
pub use data_source::{DirectoryDataSource, HttpDataSource};
pub use upload_queue::{UploadQueue, UploadSummary};
