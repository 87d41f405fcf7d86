//! Catalog module
//!
//! Registers data files as queryable tables.
//!
//! # Overview
//!
//! The catalog module provides:
//! - `CatalogRegistrar` - Maps (path, table name) pairs to session registrations
//!   by sniffing file extensions, and keeps a ledger of what was registered

mod registrar;

pub use registrar::CatalogRegistrar;

#[cfg(test)]
mod tests;
