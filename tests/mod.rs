//! Test suite for blink
//!
//! This module organizes all integration and property tests

#[macro_use]
mod common;
