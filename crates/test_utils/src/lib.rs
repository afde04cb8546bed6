//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! bill ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built accounts and instants
//! - `builders`: Ledger construction with an in-memory treasury and manual clock
//! - `assertions`: Ledger-wide consistency checks
//! - `generators`: Property-based test data generators
//! - `logging`: Test-friendly tracing subscriber

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod logging;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use logging::init_test_tracing;
