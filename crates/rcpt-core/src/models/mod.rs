//! Data models for ledger entries and configuration.

pub mod config;
pub mod entry;
