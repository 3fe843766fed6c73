//! Route handlers

pub mod api;
