//! Shared Module
//!
//! This module contains types and data structures that are shared by the
//! websocket channels, the REST handlers and the store adapters. All types
//! are designed for JSON serialization in the camelCase wire format the
//! client expects.

/// Outbound realtime events
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// User document model and channel payloads
pub mod messaging;

/// Re-export commonly used types for convenience
pub use event::{Outbound, ServerEvent};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
