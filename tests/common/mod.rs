//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - In-memory application fixtures (store, presence, router)
//! - Seeded users and minted tokens
//! - Channel probes that drive a session without a socket
//! - A store double whose writes fail
//! - Custom assertion macros

#[macro_use]
pub mod assertions;
pub mod fixtures;

pub use failing_store::FailingStore;
pub use fixtures::*;
