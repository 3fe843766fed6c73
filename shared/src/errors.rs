//! Shared error types for the contract dashboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown contract status: {input}")]
    UnknownStatus { input: String },

    #[error("Unknown risk level: {input}")]
    UnknownRisk { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
