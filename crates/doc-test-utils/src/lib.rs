//! Shared test utilities for the Ultra-Doc workspace.
//!
//! A dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`corpus`]: [`TestCorpus`] builder for two-track project fixtures

pub mod corpus;

pub use corpus::TestCorpus;
