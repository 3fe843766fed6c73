//! Runtime configuration for the dashboard

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use shared::{SharedError, SharedResult};

use crate::core::intake::IntakePolicy;
use crate::core::query::DEFAULT_PAGE_SIZE;
use crate::services::data_source::DEFAULT_FETCH_TIMEOUT;

/// Where contract data is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// Base URL serving `contracts.json` and `contract-details.json`
    Http { base_url: String },
    /// Local directory holding the same two files
    Directory { root: PathBuf },
}

/// Upload simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSettings {
    pub tick_interval: Duration,
    /// Upper bound (exclusive) of the per-tick progress increment, in percent
    pub max_increment: f64,
    pub success_probability: f64,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(500),
            max_increment: 30.0,
            success_probability: 0.9,
            seed: None,
        }
    }
}

impl UploadSettings {
    pub fn validate(&self) -> SharedResult<()> {
        if self.tick_interval.is_zero() {
            return Err(invalid("tick_interval", format!("{:?}", self.tick_interval)));
        }
        if !self.max_increment.is_finite() || self.max_increment <= 0.0 {
            return Err(invalid("max_increment", self.max_increment));
        }
        if !(0.0..=1.0).contains(&self.success_probability) {
            return Err(invalid("success_probability", self.success_probability));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub bind_address: SocketAddr,
    pub data_source: DataSourceConfig,
    /// Upper bound on one data source request
    pub fetch_timeout: Duration,
    pub page_size: usize,
    pub uploads: UploadSettings,
    pub intake: IntakePolicy,
}

impl DashboardConfig {
    pub fn new(bind_address: SocketAddr, data_source: DataSourceConfig) -> Self {
        Self {
            bind_address,
            data_source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            uploads: UploadSettings::default(),
            intake: IntakePolicy::default(),
        }
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.page_size == 0 {
            return Err(invalid("page_size", self.page_size));
        }
        if self.fetch_timeout.is_zero() {
            return Err(invalid("fetch_timeout", format!("{:?}", self.fetch_timeout)));
        }
        if self.intake.max_bytes == 0 {
            return Err(invalid("max_upload_bytes", self.intake.max_bytes));
        }
        if let DataSourceConfig::Http { base_url } = &self.data_source {
            url::Url::parse(base_url).map_err(|_| invalid("data_url", base_url))?;
        }
        self.uploads.validate()
    }
}

fn invalid(field: &str, value: impl ToString) -> SharedError {
    SharedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
    }
}
