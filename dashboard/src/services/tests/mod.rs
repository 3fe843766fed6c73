//! Service tests for the dashboard
//!
//! This module contains tests for the data sources, the contract service and
//! the upload queue scheduler.

pub mod helpers;
