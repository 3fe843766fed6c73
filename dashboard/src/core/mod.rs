//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod contract_store;
pub mod intake;
pub mod query;
pub mod random;
pub mod state;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use contract_store::ContractStore;
pub use intake::{FileCandidate, IntakePolicy, Rejection};
pub use query::{ContractFilter, ContractPage, ContractStats, QueryEngine, QueryUpdate};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{ContractsView, DashboardState, FetchState};
pub use upload::{TickOutcome, UploadEntry, UploadId, UploadStatus};
