//! HTTP presentation boundary

pub mod handlers;

use std::sync::Arc;

use crate::services::{ContractService, UploadQueue};
use crate::traits::DataSource;

/// Router state shared by every handler
pub struct ApiState<D: DataSource> {
    pub contracts: Arc<ContractService<D>>,
    pub uploads: UploadQueue,
}

impl<D: DataSource> ApiState<D> {
    pub fn new(contracts: Arc<ContractService<D>>, uploads: UploadQueue) -> Self {
        Self { contracts, uploads }
    }
}

impl<D: DataSource> Clone for ApiState<D> {
    fn clone(&self) -> Self {
        Self {
            contracts: self.contracts.clone(),
            uploads: self.uploads.clone(),
        }
    }
}
