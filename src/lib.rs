//! Rostering engine for human-services providers.
//!
//! This crate expands recurring shift patterns into concrete shift rows,
//! classifies shifts into NDIS rate bands, and maintains per-client budget
//! ledgers with conditional deductions on shift completion. A small axum API
//! exposes these operations behind a tenant-scoped session guard.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod rostering;
pub mod store;
