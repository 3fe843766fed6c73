//! Contract dashboard library
//!
//! Query engine over the contract collection, upload lifecycle simulation and
//! the JSON API that exposes both.

pub mod config;
pub mod core;
pub mod dashboard_impl;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod web;

// Re-export main types
pub use config::{DashboardConfig, DataSourceConfig, UploadSettings};
pub use dashboard_impl::Dashboard;
pub use error::{DashboardError, DashboardResult};

// Re-export trait definitions
pub use traits::DataSource;

// Re-export service implementations
pub use services::{ContractService, DirectoryDataSource, HttpDataSource, UploadQueue};
