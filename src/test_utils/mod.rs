//! Test utilities for integration testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory repository implementations for mocking persistence
//! - A builder for `AppState` backed by those mocks

mod app_state_builder;
mod factories;
mod signup_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use signup_mocks::*;
