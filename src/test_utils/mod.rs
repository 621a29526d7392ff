//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - In-memory port implementations (store, email provider, PDF fetcher)
//! - `TestAppStateBuilder` for route tests
//! - A local stub server for the HTTP adapters

mod app_state_builder;
mod email_mocks;
mod factories;
mod http_stub;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use email_mocks::*;
pub use factories::*;
pub use http_stub::*;
pub use waitlist_mocks::*;
